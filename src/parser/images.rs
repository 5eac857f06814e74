use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::ElementRef;
use tracing::debug;

use super::selectors;

const MAX_IMAGES: usize = 10;

const THUMBNAIL_HOST: &str = "thumbnail.image.rakuten.co.jp";

/// Size parameters rewritten to the larger rendition on the thumbnail host.
const THUMBNAIL_SIZES: [&str; 3] = ["?_ex=128x128", "?_ex=64x64", "?_ex=200x200"];
const LARGE_SIZE: &str = "?_ex=400x400";

/// Lazy-loading pages put the real URL in one of these.
const SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy"];

static SCRIPT_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^"\s]+\.(?:jpg|jpeg|png|gif|webp)"#)
        .expect("script image pattern is valid")
});

/// Gallery images first, then image URLs embedded in inline scripts.
pub(crate) fn extract_images(root: ElementRef<'_>, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    let mut images: Vec<String> = Vec::new();

    for img in selectors::images::GALLERY
        .iter()
        .flat_map(|selector| root.select(selector))
    {
        let Some(src) = image_source(img) else {
            continue;
        };
        let url = upscale_thumbnail(&resolve(base.as_ref(), src));
        if !images.contains(&url) {
            images.push(url);
        }
    }
    let gallery_count = images.len();

    for script in root.select(&selectors::images::SCRIPT) {
        let body: String = script.text().collect();
        for found in SCRIPT_IMAGE_RE.find_iter(&body) {
            let url = found.as_str();
            if url.contains("rakuten") && !already_listed(&images, url) {
                images.push(url.to_string());
            }
        }
    }

    debug!(
        gallery = gallery_count,
        scripts = images.len() - gallery_count,
        "collected image candidates"
    );
    images.truncate(MAX_IMAGES);
    images
}

fn image_source<'a>(img: ElementRef<'a>) -> Option<&'a str> {
    SOURCE_ATTRS
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .find(|value| !value.is_empty())
}

/// Gallery URLs are stored in serialized (percent-encoded) form, so a raw
/// script URL is compared both as written and after serialization.
fn already_listed(images: &[String], url: &str) -> bool {
    let serialized = Url::parse(url).ok().map(String::from);
    images
        .iter()
        .any(|known| known == url || serialized.as_deref() == Some(known.as_str()))
}

fn resolve(base: Option<&Url>, src: &str) -> String {
    base.and_then(|base| base.join(src).ok())
        .map_or_else(|| src.to_string(), String::from)
}

/// Swaps known small thumbnail sizes for the 400x400 rendition.
pub fn upscale_thumbnail(url: &str) -> String {
    if !url.contains(THUMBNAIL_HOST) {
        return url.to_string();
    }
    THUMBNAIL_SIZES
        .iter()
        .fold(url.to_string(), |acc, size| acc.replace(size, LARGE_SIZE))
}
