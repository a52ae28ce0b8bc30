//! The rendered-page abstraction the engine drives.
//!
//! A [`Page`] is one browser tab (or its static-HTML stand-in). The engine
//! takes it by `&mut` for the duration of one store's pipeline, so a page is
//! never shared between two stores at the same time.

mod html;
#[cfg(feature = "chrome")]
mod chrome;

use std::path::Path;

use async_trait::async_trait;

use crate::dom;
use crate::error::PageError;

#[cfg(feature = "chrome")]
pub use chrome::ChromePage;
pub use html::HtmlPage;

/// How long `navigate` waits before handing control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// The initial document has been parsed.
    ContentLoaded,
    /// The network has been quiet for a short window. Used for pages that
    /// render listings client-side.
    NetworkIdle,
}

#[async_trait]
pub trait Page: Send + Sync {
    /// Loads `url`, replacing the current document.
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<(), PageError>;

    /// Serialized HTML of the current document.
    async fn content(&self) -> Result<String, PageError>;

    /// Number of elements currently matching `selector`.
    async fn query_count(&self, selector: &str) -> Result<usize, PageError> {
        let html = self.content().await?;
        dom::count_matches(&html, selector)
    }

    /// Clicks the `index`-th element matching `selector`.
    async fn click(&mut self, selector: &str, index: usize) -> Result<(), PageError>;

    /// Writes a screenshot of the current page to `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), PageError>;
}
