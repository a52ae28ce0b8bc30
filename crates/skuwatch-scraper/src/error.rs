use serde::Serialize;
use thiserror::Error;

/// Failures reported by a [`crate::Page`] provider.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("no document loaded; navigate first")]
    NoDocument,

    #[error("{operation} is not supported by this page provider")]
    Unsupported { operation: &'static str },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no element #{index} matches \"{selector}\"")]
    ElementNotFound { selector: String, index: usize },

    #[error("invalid identity header: {reason}")]
    InvalidIdentity { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(String),
}

/// Failures inside one store's pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no site adapter registered for store \"{store_id}\"")]
    UnknownStore { store_id: String },

    #[error("timed out after {timeout_ms}ms waiting for \"{query}\"")]
    Timeout { query: String, timeout_ms: u64 },

    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error(transparent)]
    Page(#[from] PageError),
}

impl ScrapeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::UnknownStore { .. }
            | ScrapeError::Page(PageError::InvalidSelector { .. }) => ErrorKind::Configuration,
            ScrapeError::Timeout { .. } => ErrorKind::Timeout,
            ScrapeError::Navigation { .. } => ErrorKind::Navigation,
            ScrapeError::Page(_) => ErrorKind::Page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown store or a broken adapter definition. Raised before navigation.
    Configuration,
    /// The product list never became queryable.
    Timeout,
    /// The search page failed to load.
    Navigation,
    /// Any other failure talking to the page.
    Page,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Navigation => write!(f, "navigation"),
            ErrorKind::Page => write!(f, "page"),
        }
    }
}

/// Failure value returned by [`crate::scrape_store`]. Fatal for one store
/// only; the driver records it and moves on.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{store_id}: {kind} error: {message}")]
pub struct StoreScrapeError {
    pub store_id: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreScrapeError {
    #[must_use]
    pub fn new(store_id: &str, err: &ScrapeError) -> Self {
        Self {
            store_id: store_id.to_owned(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selector_is_a_configuration_error() {
        let err = ScrapeError::Page(PageError::InvalidSelector {
            selector: "li[".to_owned(),
            reason: "unexpected end".to_owned(),
        });
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn browser_failure_is_not_a_configuration_error() {
        let err = ScrapeError::Page(PageError::Browser(
            "Execution context was destroyed".to_owned(),
        ));
        assert_eq!(err.kind(), ErrorKind::Page);
    }

    #[test]
    fn store_error_carries_kind_and_message() {
        let err = ScrapeError::Timeout {
            query: ".item-cell".to_owned(),
            timeout_ms: 10_000,
        };
        let store_err = StoreScrapeError::new("newegg", &err);
        assert_eq!(store_err.kind, ErrorKind::Timeout);
        assert_eq!(
            store_err.to_string(),
            "newegg: timeout error: timed out after 10000ms waiting for \".item-cell\""
        );
    }
}
