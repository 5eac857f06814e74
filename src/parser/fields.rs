use std::collections::BTreeSet;

use scraper::ElementRef;
use serde_json::Value;

use super::selectors;
use super::text::{char_len, first_text, stripped_text, union_texts};
use crate::models::{PriceInfo, ShopInfo, Specifications};

/// Description pieces at or below this many characters are dropped.
const MIN_DESCRIPTION_CHARS: usize = 50;

/// Button labels at or above this many characters are not call-to-action text.
const MAX_CTA_CHARS: usize = 50;

pub(crate) fn extract_title(root: ElementRef<'_>) -> String {
    first_text(root, &selectors::TITLE)
        .or_else(|| {
            root.select(&selectors::TITLE_ELEMENT)
                .next()
                .map(|title| clean_page_title(&stripped_text(title, "")))
        })
        .unwrap_or_default()
}

/// Removes the marketplace name from a `<title>` value.
fn clean_page_title(title: &str) -> String {
    title
        .replace("【楽天市場】", "")
        .replace("楽天市場", "")
        .trim()
        .to_string()
}

pub(crate) fn extract_price(root: ElementRef<'_>) -> PriceInfo {
    let current = first_text(root, &selectors::price::CURRENT).unwrap_or_default();
    PriceInfo {
        current_price: current.clone(),
        original_price: first_text(root, &selectors::price::ORIGINAL).unwrap_or_default(),
        discount_rate: first_text(root, &selectors::price::DISCOUNT).unwrap_or_default(),
        price_text: current,
    }
}

/// Long description blocks followed by every catch-copy piece, separated by
/// blank lines.
pub(crate) fn extract_description(root: ElementRef<'_>) -> String {
    let body = selectors::description::BODY
        .iter()
        .flat_map(|selector| root.select(selector))
        .map(|element| stripped_text(element, "\n"))
        .filter(|text| char_len(text) > MIN_DESCRIPTION_CHARS);

    let catch_copy = union_texts(root, &selectors::description::CATCH_COPY);

    body.chain(catch_copy).collect::<Vec<_>>().join("\n\n")
}

/// First two cells of every spec row. A later row with the same key wins.
pub(crate) fn extract_specifications(root: ElementRef<'_>) -> Specifications {
    let mut specs = Specifications::new();
    for row in selectors::SPEC_ROWS
        .iter()
        .flat_map(|selector| root.select(selector))
    {
        let cells: Vec<ElementRef<'_>> = row.select(&selectors::SPEC_CELL).collect();
        let [key_cell, value_cell, ..] = cells.as_slice() else {
            continue;
        };
        let key = stripped_text(*key_cell, "");
        let value = stripped_text(*value_cell, "");
        if !key.is_empty() && !value.is_empty() {
            specs.insert(key, Value::String(value));
        }
    }
    specs
}

pub(crate) fn extract_shop_info(root: ElementRef<'_>) -> ShopInfo {
    ShopInfo {
        name: first_text(root, &selectors::SHOP_NAME).unwrap_or_default(),
        ..ShopInfo::default()
    }
}

pub(crate) fn extract_breadcrumbs(root: ElementRef<'_>) -> Vec<String> {
    union_texts(root, &selectors::BREADCRUMBS).collect()
}

pub(crate) fn extract_features(root: ElementRef<'_>) -> Vec<String> {
    union_texts(root, &selectors::FEATURES).collect()
}

pub(crate) fn extract_cta_buttons(root: ElementRef<'_>) -> BTreeSet<String> {
    union_texts(root, &selectors::CTA_BUTTONS)
        .filter(|text| char_len(text) < MAX_CTA_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn title_prefers_item_name_heading() {
        let html = doc(r#"<title>x</title><h1>Other</h1><h1 class="item_name"> Widget </h1>"#);
        assert_eq!(extract_title(html.root_element()), "Widget");
    }

    #[test]
    fn title_falls_back_to_cleaned_page_title() {
        let html = doc("<html><head><title>【楽天市場】サンプル商品</title></head><body></body></html>");
        assert_eq!(extract_title(html.root_element()), "サンプル商品");
    }

    #[test]
    fn title_strips_bare_marketplace_name() {
        let html = doc("<title>サンプル商品：楽天市場</title>");
        assert_eq!(extract_title(html.root_element()), "サンプル商品：");
    }

    #[test]
    fn title_empty_without_heading_or_title_element() {
        let html = doc("<div>nothing here</div>");
        assert_eq!(extract_title(html.root_element()), "");
    }

    #[test]
    fn price_fields_use_independent_fallbacks() {
        let html = doc(
            r#"<span class="sale-price">¥800</span>
               <span class="price-value">¥900</span>
               <span class="regular-price">¥1,200</span>
               <span class="sale-rate">25%OFF</span>"#,
        );
        let price = extract_price(html.root_element());
        assert_eq!(price.current_price, "¥900");
        assert_eq!(price.price_text, "¥900");
        assert_eq!(price.original_price, "¥1,200");
        assert_eq!(price.discount_rate, "25%OFF");
    }

    #[test]
    fn price_empty_when_unmatched() {
        let html = doc("<p>no price</p>");
        assert_eq!(extract_price(html.root_element()), PriceInfo::default());
    }

    #[test]
    fn description_filters_short_body_but_keeps_catch_copy() {
        let long = "あ".repeat(51);
        let exactly_fifty = "い".repeat(50);
        let html = doc(&format!(
            r#"<div class="item_desc">{long}</div>
               <div class="description">{exactly_fifty}</div>
               <p class="item_catch">短い</p>
               <ul class="feature-list"><li>軽量</li></ul>"#
        ));
        assert_eq!(
            extract_description(html.root_element()),
            format!("{long}\n\n短い\n\n軽量")
        );
    }

    #[test]
    fn description_joins_body_lines_with_newlines() {
        let first = "a".repeat(30);
        let second = "b".repeat(30);
        let html = doc(&format!(
            r#"<div class="product-description"><p>{first}</p><p>{second}</p></div>"#
        ));
        assert_eq!(
            extract_description(html.root_element()),
            format!("{first}\n{second}")
        );
    }

    #[test]
    fn description_ignores_inline_style_when_measuring_length() {
        let html = doc(
            r#"<div class="item_desc">
                 <style>.x{color:red;font-size:12px;margin:0 auto;padding:4px 8px;}</style>
                 <p>送料無料</p>
               </div>"#,
        );
        assert_eq!(extract_description(html.root_element()), "");
    }

    #[test]
    fn features_drop_inline_script_text() {
        let html = doc(r#"<ul class="feature_list"><li>防水<script>track()</script></li></ul>"#);
        assert_eq!(extract_features(html.root_element()), ["防水"]);
    }

    #[test]
    fn specifications_later_duplicate_wins() {
        let html = doc(
            r#"<table class="spec_table">
                 <tr><th>サイズ</th><td>S</td></tr>
                 <tr><th>素材</th><td>綿</td></tr>
                 <tr><th>サイズ</th><td>M</td></tr>
                 <tr><td>only one cell</td></tr>
                 <tr><th></th><td>no key</td></tr>
               </table>"#,
        );
        let specs = extract_specifications(html.root_element());
        assert_eq!(specs.len(), 2);
        assert_eq!(specs["サイズ"], "M");
        assert_eq!(specs["素材"], "綿");
        let keys: Vec<&str> = specs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["サイズ", "素材"]);
    }

    #[test]
    fn shop_info_only_fills_name() {
        let html = doc(r#"<a class="shop-name">テスト店</a>"#);
        let shop = extract_shop_info(html.root_element());
        assert_eq!(shop.name, "テスト店");
        assert!(shop.rating.is_empty());
        assert!(shop.url.is_empty());
    }

    #[test]
    fn breadcrumbs_keep_duplicates_in_order() {
        let html = doc(
            r#"<nav class="breadcrumb"><a>ホーム</a><a>家電</a></nav>
               <nav class="navigation"><a>ホーム</a></nav>"#,
        );
        assert_eq!(extract_breadcrumbs(html.root_element()), ["ホーム", "家電", "ホーム"]);
    }

    #[test]
    fn features_union_across_lists() {
        let html = doc(
            r#"<ul class="benefits"><li>送料無料</li></ul>
               <ul class="feature_list"><li>防水</li><li> </li></ul>"#,
        );
        assert_eq!(extract_features(html.root_element()), ["防水", "送料無料"]);
    }

    #[test]
    fn cta_buttons_drop_long_labels_and_dedupe() {
        let long = "x".repeat(50);
        let html = doc(&format!(
            r#"<button class="add-to-cart">かごに追加</button>
               <button type="submit">かごに追加</button>
               <a class="btn-buy">今すぐ購入</a>
               <a class="btn-primary">{long}</a>"#
        ));
        let buttons = extract_cta_buttons(html.root_element());
        assert_eq!(buttons.len(), 2);
        assert!(buttons.contains("かごに追加"));
        assert!(buttons.contains("今すぐ購入"));
    }
}
