//! Product page extraction.
//!
//! Every field has its own extractor working read-only on the parsed
//! document. Extractors never fail: a field whose selectors match nothing
//! keeps its empty default.

mod fields;
mod images;
mod reviews;
mod selectors;
mod text;

use scraper::Html;
use tracing::debug;

use crate::error::ScrapeError;
use crate::fetcher::validate_url;
use crate::models::ProductRecord;

pub use images::upscale_thumbnail;
pub use reviews::summarize;

/// Parses `html` and extracts a [`ProductRecord`] for the page at `url`.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if `url` is not an absolute http(s) URL.
pub fn parse_product(url: &str, html: &str) -> Result<ProductRecord, ScrapeError> {
    validate_url(url)?;
    let document = Html::parse_document(html);
    Ok(extract(&document, url))
}

/// Runs every field extractor over an already parsed document.
///
/// `base_url` is copied into the record and used to resolve relative image
/// sources.
#[must_use]
pub fn extract(document: &Html, base_url: &str) -> ProductRecord {
    let root = document.root_element();

    let record = ProductRecord {
        url: base_url.to_string(),
        title: fields::extract_title(root),
        price: fields::extract_price(root),
        description: fields::extract_description(root),
        images: images::extract_images(root, base_url),
        reviews: reviews::extract_reviews(root),
        specifications: fields::extract_specifications(root),
        shop_info: fields::extract_shop_info(root),
        breadcrumbs: fields::extract_breadcrumbs(root),
        features: fields::extract_features(root),
        cta_buttons: fields::extract_cta_buttons(root),
    };

    debug!(
        title = %record.title,
        price = %record.price.current_price,
        images = record.images.len(),
        reviews = record.reviews.reviews.len(),
        specifications = record.specifications.len(),
        breadcrumbs = record.breadcrumbs.len(),
        features = record.features.len(),
        cta_buttons = record.cta_buttons.len(),
        "extracted product fields"
    );
    record
}
