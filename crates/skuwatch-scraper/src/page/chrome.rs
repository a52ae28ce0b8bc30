use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{Page, WaitPolicy};
use crate::error::PageError;

/// Longest the network-idle heuristic runs before giving up and letting the
/// readiness probe decide.
const NETWORK_IDLE_TIMEOUT_MS: u64 = 15_000;

fn browser_err(e: impl std::fmt::Display) -> PageError {
    PageError::Browser(e.to_string())
}

/// [`Page`] backed by a headless Chromium tab driven over CDP.
pub struct ChromePage {
    browser: Browser,
    page: chromiumoxide::Page,
    handler: JoinHandle<()>,
}

impl ChromePage {
    /// Launches a headless browser with one blank tab presenting the given
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Browser`] if Chromium cannot be found or started.
    pub async fn launch(user_agent: &str, accept_language: &str) -> Result<Self, PageError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(browser_err)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(browser_err)?;
        let identity = SetUserAgentOverrideParams::builder()
            .user_agent(user_agent)
            .accept_language(accept_language)
            .build()
            .map_err(browser_err)?;
        page.set_user_agent(identity).await.map_err(browser_err)?;

        tracing::info!("headless browser launched");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Shuts the browser down. Errors are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "failed to close browser");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }

    /// Polls resource-timing entries until no new request has started for a
    /// second, `readyState` is `complete`, or the heuristic times out.
    async fn wait_for_network_idle(&self) {
        let js = format!(
            r"(async () => {{
                const timeoutMs = {NETWORK_IDLE_TIMEOUT_MS};
                const idleMs = 1000;
                const interval = 250;
                const start = Date.now();
                const count = () => {{
                    try {{ return performance.getEntriesByType('resource').length; }}
                    catch (_) {{ return 0; }}
                }};
                let last = count();
                let stable = 0;
                while (Date.now() - start < timeoutMs) {{
                    await new Promise(r => setTimeout(r, interval));
                    const cur = count();
                    if (document.readyState === 'complete' && cur === last) {{
                        stable += interval;
                        if (stable >= idleMs) return true;
                    }} else {{
                        stable = 0;
                    }}
                    last = cur;
                }}
                return false;
            }})()"
        );

        match self.page.evaluate(js).await {
            Ok(val) => {
                if !val.into_value::<bool>().unwrap_or(false) {
                    tracing::debug!(
                        timeout_ms = NETWORK_IDLE_TIMEOUT_MS,
                        "network never went idle"
                    );
                }
            }
            Err(e) => tracing::debug!(error = %e, "network-idle heuristic failed"),
        }
    }
}

#[async_trait]
impl Page for ChromePage {
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<(), PageError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| PageError::Navigation {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        if wait == WaitPolicy::NetworkIdle {
            self.wait_for_network_idle().await;
        }
        Ok(())
    }

    async fn content(&self) -> Result<String, PageError> {
        self.page.content().await.map_err(browser_err)
    }

    async fn query_count(&self, selector: &str) -> Result<usize, PageError> {
        let literal = serde_json::to_string(selector).map_err(browser_err)?;
        let js = format!("document.querySelectorAll({literal}).length");
        let count = self
            .page
            .evaluate(js)
            .await
            .map_err(browser_err)?
            .into_value::<u64>()
            .map_err(browser_err)?;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    async fn click(&mut self, selector: &str, index: usize) -> Result<(), PageError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(browser_err)?;
        let element = elements.get(index).ok_or_else(|| PageError::ElementNotFound {
            selector: selector.to_owned(),
            index,
        })?;
        element.click().await.map_err(browser_err)?;
        // Let the click's handlers run before the next snapshot.
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await
            .map_err(browser_err)?;
        Ok(())
    }
}
