use std::path::PathBuf;
use std::time::Duration;

use skuwatch_core::{AppConfig, ProductRecord, StoreProfile};

use crate::adapter::resolve;
use crate::error::{ScrapeError, StoreScrapeError};
use crate::normalize::normalize_node;
use crate::page::Page;

/// Timing and diagnostics settings shared by every store pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bound on the readiness wait.
    pub ready_timeout: Duration,
    /// Pause after each successful overlay click.
    pub overlay_settle: Duration,
    /// Interval between readiness and overlay probes.
    pub poll_interval: Duration,
    /// Where readiness-timeout snapshots go. `None` disables capture.
    pub diagnostics_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_millis(10_000),
            overlay_settle: Duration::from_millis(1_000),
            poll_interval: Duration::from_millis(250),
            diagnostics_dir: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            ready_timeout: Duration::from_millis(config.ready_timeout_ms),
            overlay_settle: Duration::from_millis(config.overlay_settle_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            diagnostics_dir: config.diagnostics_dir.clone(),
        }
    }
}

/// Runs one store's pipeline: resolve adapter, navigate, wait for
/// readiness, dismiss overlays, extract, filter and normalize.
///
/// `page` is used exclusively until this returns. `Ok(vec![])` means the
/// store loaded but nothing matched `query`; every failure is returned as a
/// [`StoreScrapeError`] so the caller can record it and move on to the next
/// store.
///
/// # Errors
///
/// Returns [`StoreScrapeError`] with kind `Configuration` for an unknown
/// store (before any navigation), `Navigation` if the search page cannot be
/// loaded, `Timeout` if the product list never appears, and `Page` for other
/// page failures.
pub async fn scrape_store<P: Page + ?Sized>(
    page: &mut P,
    profile: &StoreProfile,
    query: &str,
    config: &EngineConfig,
) -> Result<Vec<ProductRecord>, StoreScrapeError> {
    match run_pipeline(page, profile, query, config).await {
        Ok(records) => {
            tracing::info!(store_id = %profile.id, count = records.len(), "store scraped");
            Ok(records)
        }
        Err(err) => {
            tracing::warn!(
                store_id = %profile.id,
                kind = %err.kind(),
                error = %err,
                "store scrape failed"
            );
            Err(StoreScrapeError::new(&profile.id, &err))
        }
    }
}

async fn run_pipeline<P: Page + ?Sized>(
    page: &mut P,
    profile: &StoreProfile,
    query: &str,
    config: &EngineConfig,
) -> Result<Vec<ProductRecord>, ScrapeError> {
    let adapter = resolve(&profile.id)?;
    let url = profile.search_url_for(query);

    tracing::debug!(store_id = %profile.id, url = %url, "navigating");
    page.navigate(&url, adapter.wait_policy())
        .await
        .map_err(|e| ScrapeError::Navigation {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    adapter.wait_for_ready(&*page, config).await?;
    adapter.dismiss_overlays(page, config).await;
    let nodes = adapter.extract_candidates(&*page, query).await?;

    Ok(nodes.iter().map(|node| normalize_node(node, profile)).collect())
}
