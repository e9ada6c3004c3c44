//! HTML link extraction
//!
//! Turns a fetched document body into the raw anchor targets it contains.
//! Resolution and filtering happen later, in the crawl scope and session.

use scraper::{Html, Selector};

/// Extracts the `href` of every followable anchor in `html`
///
/// # Extraction Rules
///
/// **Include:**
/// - `<a href="...">` without a `rel` attribute
/// - `<a href="..." rel="...">` where `rel` is anything but exactly `nofollow`
///
/// **Exclude:**
/// - `<a href="..." rel="nofollow">`
/// - Anchors without an `href`
///
/// Values are returned verbatim in document order. Malformed markup never
/// fails; the parser recovers and whatever anchors it finds are returned.
///
/// # Example
///
/// ```
/// use sumi_sweep::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a><a href="/b" rel="nofollow">B</a>"#;
/// assert_eq!(extract_links(html), vec!["/a".to_string()]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchor_selector)
        .filter(|element| element.value().attr("rel") != Some("nofollow"))
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
