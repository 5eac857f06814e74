//! Text helpers shared by the field extractors.

use scraper::{ElementRef, Selector};

/// Elements whose text content is code or markup, never visible copy.
const NON_VISIBLE: [&str; 3] = ["script", "style", "template"];

/// Trims every visible descendant text node, drops the empty ones and joins
/// the rest with `separator`.
pub(crate) fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|parent| NON_VISIBLE.contains(&parent.name()))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Ordered fallback: the first selector whose first match has non-empty text.
pub(crate) fn first_text(scope: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        scope
            .select(selector)
            .next()
            .map(|element| stripped_text(element, ""))
            .filter(|text| !text.is_empty())
    })
}

/// Union: non-empty text of every element matched by any selector, in
/// selector order and then document order.
pub(crate) fn union_texts<'a>(
    scope: ElementRef<'a>,
    selectors: &'a [Selector],
) -> impl Iterator<Item = String> + 'a {
    selectors
        .iter()
        .flat_map(move |selector| scope.select(selector))
        .map(|element| stripped_text(element, ""))
        .filter(|text| !text.is_empty())
}

/// Length in characters, not bytes.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
