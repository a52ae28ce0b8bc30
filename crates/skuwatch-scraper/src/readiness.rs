//! Readiness probing and failure diagnostics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use crate::error::ScrapeError;
use crate::page::Page;

/// Polls until at least one element matches `selector` or `timeout` elapses.
///
/// At least one probe is always made, so an already-rendered page returns
/// `true` even with a zero timeout. Probe failures count as "not yet".
pub async fn poll_for_selector<P: Page + ?Sized>(
    page: &P,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match page.query_count(selector).await {
            Ok(n) if n > 0 => return true,
            Ok(_) => {}
            Err(e) => tracing::debug!(selector, error = %e, "readiness probe failed"),
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        tokio::time::sleep(poll_interval.min(deadline - now)).await;
    }
}

/// Waits for the product list to become queryable.
///
/// # Errors
///
/// Returns [`ScrapeError::Timeout`] if `selector` never matches within
/// `timeout`.
pub async fn wait_for_ready<P: Page + ?Sized>(
    page: &P,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), ScrapeError> {
    if poll_for_selector(page, selector, timeout, poll_interval).await {
        Ok(())
    } else {
        Err(ScrapeError::Timeout {
            query: selector.to_owned(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

/// Saves what the page looked like when readiness failed.
///
/// Writes `<dir>/<store_id>-<UTC timestamp>.png`, or an `.html` DOM dump
/// when the provider cannot take screenshots. Capture failures are logged
/// and swallowed; they never replace the timeout being reported.
pub async fn capture_diagnostics<P: Page + ?Sized>(
    page: &P,
    dir: &Path,
    store_id: &str,
) -> Option<PathBuf> {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::warn!(dir = %dir.display(), error = %e, "cannot create diagnostics directory");
        return None;
    }

    let stem = format!("{store_id}-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ"));

    let png = dir.join(format!("{stem}.png"));
    match page.screenshot(&png).await {
        Ok(()) => {
            tracing::info!(store_id, path = %png.display(), "saved diagnostic screenshot");
            return Some(png);
        }
        Err(e) => tracing::debug!(store_id, error = %e, "screenshot unavailable, dumping DOM"),
    }

    let html_path = dir.join(format!("{stem}.html"));
    let html = match page.content().await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(store_id, error = %e, "failed to capture diagnostics");
            return None;
        }
    };
    match tokio::fs::write(&html_path, html).await {
        Ok(()) => {
            tracing::info!(store_id, path = %html_path.display(), "saved diagnostic DOM dump");
            Some(html_path)
        }
        Err(e) => {
            tracing::warn!(store_id, error = %e, "failed to write diagnostics");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;

    const LISTING: &str = r#"<ul><li class="sku-item">RTX 5090</li></ul>"#;

    #[tokio::test(start_paused = true)]
    async fn ready_page_returns_immediately() {
        let page = HtmlPage::from_html(LISTING);
        let started = Instant::now();
        wait_for_ready(
            &page,
            "li.sku-item",
            Duration::from_secs(10),
            Duration::from_millis(250),
        )
        .await
        .unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_selector_times_out_at_deadline() {
        let page = HtmlPage::from_html(LISTING);
        let started = Instant::now();
        let err = wait_for_ready(
            &page,
            ".s-result-item",
            Duration::from_millis(1_000),
            Duration::from_millis(300),
        )
        .await
        .unwrap_err();
        assert_eq!(started.elapsed(), Duration::from_millis(1_000));
        assert!(matches!(
            err,
            ScrapeError::Timeout { ref query, timeout_ms: 1_000 } if query == ".s-result-item"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_still_probes_once() {
        let page = HtmlPage::from_html(LISTING);
        assert!(poll_for_selector(&page, "li.sku-item", Duration::ZERO, Duration::ZERO).await);
    }

    #[tokio::test]
    async fn diagnostics_fall_back_to_dom_dump() {
        let dir = tempfile::tempdir().unwrap();
        let page = HtmlPage::from_html(LISTING);
        let path = capture_diagnostics(&page, dir.path(), "bestbuy")
            .await
            .expect("a diagnostic file");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("bestbuy-"));
        assert!(name.ends_with(".html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), LISTING);
    }
}
