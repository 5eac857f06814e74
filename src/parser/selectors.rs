//! CSS selectors for marketplace product pages.
//!
//! Each list is ordered most specific first. Whether a list is tried until
//! the first hit or merged across all entries is decided by the extractor
//! that uses it.

use std::sync::LazyLock;

use scraper::Selector;

fn compile(patterns: &[&str]) -> Vec<Selector> {
    patterns.iter().map(|p| parse(p)).collect()
}

fn parse(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid selector {pattern:?}: {e}"))
}

pub(crate) static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "h1.item_name",
        r#"h1[data-testid="item-name"]"#,
        ".item_name h1",
        "h1.product-title",
        "h1",
        ".product-name h1",
        r#"[data-testid="item-name"]"#,
    ])
});

/// Document `<title>`, used when no heading matches.
pub(crate) static TITLE_ELEMENT: LazyLock<Selector> = LazyLock::new(|| parse("title"));

pub(crate) mod price {
    use super::*;

    pub(crate) static CURRENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".price_value",
            ".price-value",
            r#"[data-testid="price"]"#,
            ".item_price .price",
            ".price .number",
            ".price-current",
            ".sale-price",
        ])
    });

    pub(crate) static ORIGINAL: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".price_original",
            ".original-price",
            ".price-before",
            ".regular-price",
        ])
    });

    pub(crate) static DISCOUNT: LazyLock<Vec<Selector>> =
        LazyLock::new(|| compile(&[".discount_rate", ".discount-rate", ".sale-rate"]));
}

pub(crate) mod description {
    use super::*;

    pub(crate) static BODY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".item_desc",
            ".product-description",
            ".item-description",
            ".description",
            ".product-detail",
            ".item-detail",
        ])
    });

    /// Catch copy and feature bullets appended after the body text.
    pub(crate) static CATCH_COPY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".item_catch",
            ".product-catch",
            ".catch-copy",
            ".feature-list li",
            ".product-features li",
        ])
    });
}

pub(crate) mod images {
    use super::*;

    pub(crate) static GALLERY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".item_image img",
            ".product-image img",
            ".item-photo img",
            ".gallery img",
            ".product-gallery img",
            ".item_img img",
            r#"[data-testid="item-image"] img"#,
        ])
    });

    pub(crate) static SCRIPT: LazyLock<Selector> = LazyLock::new(|| parse("script"));
}

pub(crate) mod reviews {
    use super::*;

    pub(crate) static AVERAGE_RATING: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".review_average",
            ".rating-average",
            ".average-rating",
            r#"[data-testid="rating-average"]"#,
            ".rating-score",
            ".review-rating-average",
        ])
    });

    pub(crate) static COUNT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".review_count",
            ".review-count",
            r#"[data-testid="review-count"]"#,
            ".review-total-count",
            ".total-reviews",
        ])
    });

    pub(crate) static DISTRIBUTION: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".rating-distribution",
            ".review-rating-breakdown",
            ".star-rating-breakdown",
        ])
    });

    /// One group selector per star, index 0 is one star.
    pub(crate) static STAR_BUCKETS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        (1..=5)
            .map(|n| parse(&format!(r#"[data-rating="{n}"], .star-{n}, .rating-{n}"#)))
            .collect()
    });

    pub(crate) static ITEM: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".review_item",
            ".review-item",
            ".user-review",
            ".review-content",
            ".customer-review",
        ])
    });

    pub(crate) static TEXT: LazyLock<Selector> =
        LazyLock::new(|| parse(".review-text, .review-content, .comment-text"));

    pub(crate) static RATING: LazyLock<Selector> =
        LazyLock::new(|| parse(".rating, .star-rating, .review-rating"));

    pub(crate) static DATE: LazyLock<Selector> =
        LazyLock::new(|| parse(".review-date, .post-date, .date"));

    pub(crate) static HELPFUL: LazyLock<Selector> =
        LazyLock::new(|| parse(".helpful-count, .useful-count"));
}

pub(crate) static SPEC_ROWS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".spec_table tr",
        ".specification tr",
        ".product-spec tr",
        ".item-spec tr",
    ])
});

pub(crate) static SPEC_CELL: LazyLock<Selector> = LazyLock::new(|| parse("td, th"));

pub(crate) static SHOP_NAME: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".shop_name",
        ".shop-name",
        ".store-name",
        r#"[data-testid="shop-name"]"#,
    ])
});

pub(crate) static BREADCRUMBS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&[".breadcrumb a", ".breadcrumbs a", ".navigation a"]));

pub(crate) static FEATURES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".feature_list li",
        ".product-features li",
        ".selling-points li",
        ".highlight li",
        ".benefits li",
    ])
});

pub(crate) static CTA_BUTTONS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        ".cart_button",
        ".add-to-cart",
        ".buy-button",
        ".purchase-button",
        ".order-button",
        r#"button[type="submit"]"#,
        ".btn-primary",
        ".btn-buy",
    ])
});
