//! Product Extractor: maps candidate listing nodes in a rendered document to
//! [`RawProductNode`]s.

use scraper::Html;

use crate::dom::{first_text, parse_selector};
use crate::error::PageError;
use crate::page::Page;

/// Selectors locating listings on a search results page. The three
/// sub-queries are evaluated inside each container match only, so one
/// listing's price can never be attributed to its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRules {
    /// Selects one node per candidate product.
    pub container: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub availability: &'static str,
}

/// Text pulled from one candidate node, prior to filtering and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProductNode {
    pub title_text: String,
    pub price_text: Option<String>,
    pub availability_text: Option<String>,
}

/// Reads the page's current DOM and extracts candidates. Read-only: nothing
/// is clicked and no navigation is triggered.
///
/// # Errors
///
/// Returns [`PageError`] if the snapshot cannot be read or a rule is not
/// valid CSS.
pub async fn extract_candidates<P: Page + ?Sized>(
    page: &P,
    rules: &ExtractionRules,
) -> Result<Vec<RawProductNode>, PageError> {
    let html = page.content().await?;
    parse_candidates(&html, rules)
}

/// Extracts candidates from an HTML snapshot.
///
/// Candidates without title text are skipped. A missing price or
/// availability sub-match is recorded as `None`.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if a rule is not valid CSS.
pub fn parse_candidates(
    html: &str,
    rules: &ExtractionRules,
) -> Result<Vec<RawProductNode>, PageError> {
    let container = parse_selector(rules.container)?;
    let title = parse_selector(rules.title)?;
    let price = parse_selector(rules.price)?;
    let availability = parse_selector(rules.availability)?;

    let document = Html::parse_document(html);
    let mut nodes = Vec::new();
    let mut skipped = 0usize;

    for candidate in document.select(&container) {
        let Some(title_text) = first_text(candidate, &title) else {
            skipped += 1;
            continue;
        };
        nodes.push(RawProductNode {
            title_text,
            price_text: first_text(candidate, &price),
            availability_text: first_text(candidate, &availability),
        });
    }

    tracing::debug!(
        container = rules.container,
        count = nodes.len(),
        skipped,
        "extracted candidate listings"
    );

    Ok(nodes)
}
