use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;

use super::selectors::reviews as sel;
use super::text::{first_text, stripped_text};
use crate::models::{KeywordSummary, Review, ReviewInfo};

/// Review elements taken from each matching item selector.
const MAX_REVIEWS_PER_SELECTOR: usize = 10;

const POSITIVE_WORDS: [&str; 10] = [
    "良い", "いい", "満足", "便利", "使いやすい", "安い", "おすすめ", "快適", "丈夫", "綺麗",
];
const NEGATIVE_WORDS: [&str; 9] = [
    "悪い", "不満", "高い", "使いにくい", "壊れた", "期待外れ", "残念", "問題", "不具合",
];
const THEMES: [&str; 8] = [
    "配送", "梱包", "価格", "品質", "サイズ", "デザイン", "機能", "サポート",
];

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

pub(crate) fn extract_reviews(root: ElementRef<'_>) -> ReviewInfo {
    let reviews = collect_reviews(root);
    let review_summary = if reviews.is_empty() {
        KeywordSummary::default()
    } else {
        summarize(&reviews)
    };

    ReviewInfo {
        average_rating: first_text(root, &sel::AVERAGE_RATING).unwrap_or_default(),
        review_count: first_text(root, &sel::COUNT).unwrap_or_default(),
        rating_distribution: rating_distribution(root),
        reviews,
        review_summary,
    }
}

/// Star counts from the first distribution block found. Later block
/// selectors are not consulted even when stars are missing.
fn rating_distribution(root: ElementRef<'_>) -> BTreeMap<String, String> {
    let Some(block) = sel::DISTRIBUTION
        .iter()
        .find_map(|selector| root.select(selector).next())
    else {
        return BTreeMap::new();
    };

    sel::STAR_BUCKETS
        .iter()
        .zip(1..)
        .filter_map(|(bucket, stars)| {
            let element = block.select(bucket).next()?;
            Some((format!("{stars}star"), stripped_text(element, "")))
        })
        .collect()
}

/// Every item selector contributes up to [`MAX_REVIEWS_PER_SELECTOR`]
/// reviews. Nothing is deduplicated across selectors.
fn collect_reviews(root: ElementRef<'_>) -> Vec<Review> {
    let mut reviews = Vec::new();
    for selector in sel::ITEM.iter() {
        let before = reviews.len();
        reviews.extend(
            root.select(selector)
                .take(MAX_REVIEWS_PER_SELECTOR)
                .filter_map(parse_review),
        );
        if reviews.len() > before {
            debug!(added = reviews.len() - before, "collected reviews");
        }
    }
    reviews
}

fn parse_review(item: ElementRef<'_>) -> Option<Review> {
    let text = item
        .select(&sel::TEXT)
        .next()
        .map_or_else(|| stripped_text(item, " "), |body| stripped_text(body, " "));
    if text.is_empty() {
        return None;
    }

    let rating = item
        .select(&sel::RATING)
        .next()
        .and_then(|element| {
            DIGITS_RE
                .find(&stripped_text(element, ""))
                .map(|m| m.as_str().to_string())
        })
        .unwrap_or_default();

    let nested = |selector: &Selector| {
        item.select(selector)
            .next()
            .map(|element| stripped_text(element, ""))
            .unwrap_or_default()
    };

    Some(Review {
        text,
        rating,
        date: nested(&sel::DATE),
        helpful_count: nested(&sel::HELPFUL),
    })
}

/// Substring scan of all review text against the fixed vocabularies.
pub fn summarize(reviews: &[Review]) -> KeywordSummary {
    let all_text = reviews
        .iter()
        .map(|review| review.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let present = |words: &[&str]| -> Vec<String> {
        words
            .iter()
            .filter(|word| all_text.contains(**word))
            .map(|word| (*word).to_string())
            .collect()
    };

    KeywordSummary {
        positive_keywords: present(&POSITIVE_WORDS),
        negative_keywords: present(&NEGATIVE_WORDS),
        common_themes: present(&THEMES),
    }
}
