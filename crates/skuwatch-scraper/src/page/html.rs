use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;

use super::{Page, WaitPolicy};
use crate::error::PageError;
use crate::retry::retry_with_backoff;

/// [`Page`] backed by a plain HTTP fetch. No scripts run, so it only suits
/// stores that render listings server-side.
///
/// The wait policy is ignored: the document is complete once the body has
/// been read. Clicking and screenshots are not available, which the engine
/// treats as "overlay could not be dismissed" and "no screenshot".
pub struct HtmlPage {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
    document: Option<String>,
}

impl HtmlPage {
    /// Builds a client that presents the given browser identity on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidIdentity`] if `accept_language` is not a
    /// valid header value, or [`PageError::Http`] if the client cannot be
    /// constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PageError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(accept_language).map_err(|e| PageError::InvalidIdentity {
                reason: format!("Accept-Language: {e}"),
            })?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
            document: None,
        })
    }

    /// A page already holding `html`, as if it had been navigated to.
    #[must_use]
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            max_retries: 0,
            backoff_base_ms: 0,
            document: Some(html.into()),
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, PageError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::HttpStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Page for HtmlPage {
    async fn navigate(&mut self, url: &str, _wait: WaitPolicy) -> Result<(), PageError> {
        self.document = None;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch(url)
        })
        .await?;
        tracing::debug!(url, bytes = body.len(), "fetched document");
        self.document = Some(body);
        Ok(())
    }

    async fn content(&self) -> Result<String, PageError> {
        self.document.clone().ok_or(PageError::NoDocument)
    }

    async fn click(&mut self, _selector: &str, _index: usize) -> Result<(), PageError> {
        Err(PageError::Unsupported { operation: "click" })
    }

    async fn screenshot(&self, _path: &Path) -> Result<(), PageError> {
        Err(PageError::Unsupported {
            operation: "screenshot",
        })
    }
}
