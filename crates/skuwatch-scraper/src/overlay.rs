//! Best-effort dismissal of cookie banners, location prompts and similar
//! modals that cover a store's results.

use std::time::Duration;

use crate::page::Page;
use crate::readiness::poll_for_selector;

/// What to do once an overlay has been detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Click the first element matching the detection selector.
    ClickFirst,
    /// Click the element at this zero-based position among the matches.
    ClickNth(usize),
    /// Only wait for the overlay; it clears on its own.
    DetectOnly,
}

/// One known overlay on a store's search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySpec {
    pub label: &'static str,
    pub detect_query: &'static str,
    pub timeout_ms: u64,
    pub action: OverlayAction,
}

/// Tries each overlay in order. Absence is the normal case and a failed
/// click is tolerated; neither aborts the pipeline.
///
/// After every successful click, and after a detect-only overlay is seen,
/// the page is given `settle` to animate the overlay away before the next
/// one is polled.
pub async fn dismiss_overlays<P: Page + ?Sized>(
    page: &mut P,
    overlays: &[OverlaySpec],
    poll_interval: Duration,
    settle: Duration,
) {
    for overlay in overlays {
        let timeout = Duration::from_millis(overlay.timeout_ms);
        if !poll_for_selector(&*page, overlay.detect_query, timeout, poll_interval).await {
            tracing::debug!(overlay = overlay.label, "overlay not present");
            continue;
        }

        let index = match overlay.action {
            OverlayAction::ClickFirst => 0,
            OverlayAction::ClickNth(n) => n,
            OverlayAction::DetectOnly => {
                tracing::debug!(overlay = overlay.label, "overlay detected, no action");
                tokio::time::sleep(settle).await;
                continue;
            }
        };

        match page.click(overlay.detect_query, index).await {
            Ok(()) => {
                tracing::debug!(overlay = overlay.label, "dismissed overlay");
                tokio::time::sleep(settle).await;
            }
            Err(e) => {
                tracing::debug!(overlay = overlay.label, error = %e, "could not dismiss overlay");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;

    const POLL: Duration = Duration::from_millis(100);
    const SETTLE: Duration = Duration::from_secs(1);

    fn spec(detect_query: &'static str, action: OverlayAction) -> OverlaySpec {
        OverlaySpec {
            label: "toast",
            detect_query,
            timeout_ms: 2000,
            action,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn detect_only_overlay_waits_for_settle() {
        let mut page = HtmlPage::from_html(r#"<div id="toast">Added to list</div>"#);
        let started = tokio::time::Instant::now();
        let overlays = [spec("#toast", OverlayAction::DetectOnly)];
        dismiss_overlays(&mut page, &overlays, POLL, SETTLE).await;
        assert_eq!(started.elapsed(), SETTLE);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_click_charges_no_settle() {
        // Snapshot pages cannot click, so the dismissal fails.
        let mut page = HtmlPage::from_html(r#"<div id="toast"><button>OK</button></div>"#);
        let started = tokio::time::Instant::now();
        let overlays = [spec("#toast button", OverlayAction::ClickFirst)];
        dismiss_overlays(&mut page, &overlays, POLL, SETTLE).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn absent_overlay_costs_its_timeout() {
        let mut page = HtmlPage::from_html("<p>results</p>");
        let started = tokio::time::Instant::now();
        let overlays = [spec("#toast", OverlayAction::DetectOnly)];
        dismiss_overlays(&mut page, &overlays, POLL, SETTLE).await;
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }
}
