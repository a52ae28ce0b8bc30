//! CSS selector helpers over DOM snapshots.

use scraper::{ElementRef, Html, Selector};

use crate::error::PageError;
use crate::normalize::collapse_whitespace;

/// Parses a CSS selector, reporting the offending text on failure.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if `selector` is not valid CSS.
pub fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// Number of elements in `html` matching `selector`, the snapshot
/// equivalent of `querySelectorAll(selector).length`.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if `selector` is not valid CSS.
pub fn count_matches(html: &str, selector: &str) -> Result<usize, PageError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).count())
}

/// Text of the first element under `scope` matching `selector` that has any
/// visible text, with whitespace collapsed.
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_counts_elements() {
        let html = r#"<ul><li class="sku-item">a</li><li class="sku-item">b</li></ul>"#;
        assert_eq!(count_matches(html, "li.sku-item").unwrap(), 2);
        assert_eq!(count_matches(html, ".missing").unwrap(), 0);
    }

    #[test]
    fn count_matches_rejects_invalid_selector() {
        let err = count_matches("<p></p>", "li[").unwrap_err();
        assert!(matches!(err, PageError::InvalidSelector { ref selector, .. } if selector == "li["));
    }

    #[test]
    fn first_text_skips_empty_matches() {
        let html = r#"<div id="c"><span class="p"> </span><span class="p">$1,999<sup>.99</sup></span></div>"#;
        let document = Html::parse_fragment(html);
        let scope_sel = parse_selector("#c").unwrap();
        let scope = document.select(&scope_sel).next().unwrap();
        let price = parse_selector(".p").unwrap();
        assert_eq!(first_text(scope, &price).as_deref(), Some("$1,999.99"));
    }
}
