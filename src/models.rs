use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Specification rows keyed by their first cell, kept in document order.
///
/// Backed by serde_json's insertion-ordered map, so a repeated key replaces
/// the earlier value without moving it.
pub type Specifications = serde_json::Map<String, serde_json::Value>;

/// Everything extracted from one product page.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub title: String,
    pub price: PriceInfo,
    pub description: String,
    pub images: Vec<String>,
    pub reviews: ReviewInfo,
    pub specifications: Specifications,
    pub shop_info: ShopInfo,
    pub breadcrumbs: Vec<String>,
    pub features: Vec<String>,
    pub cta_buttons: BTreeSet<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub current_price: String,
    pub original_price: String,
    pub discount_rate: String,
    pub price_text: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInfo {
    pub average_rating: String,
    pub review_count: String,
    /// `"1star"` .. `"5star"` to the count text shown on the page.
    pub rating_distribution: BTreeMap<String, String>,
    pub reviews: Vec<Review>,
    pub review_summary: KeywordSummary,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    pub rating: String,
    pub date: String,
    pub helpful_count: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub common_themes: Vec<String>,
}

/// Shop block. Only `name` is filled in; `rating` and `url` stay empty but
/// remain in the output shape.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub name: String,
    pub rating: String,
    pub url: String,
}
