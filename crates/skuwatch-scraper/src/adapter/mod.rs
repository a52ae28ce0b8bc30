//! Site Adapter Registry: the single place store-specific behaviour lives.
//!
//! Each retailer maps to a [`SiteAdapter`] value carrying its readiness
//! query, overlays and extraction rules. The engine runs the same pipeline
//! for every adapter; only these parameters differ.

mod catalog;

use crate::engine::EngineConfig;
use crate::error::ScrapeError;
use crate::extract::{self, ExtractionRules, RawProductNode};
use crate::filter::filter_by_query;
use crate::overlay::{self, OverlaySpec};
use crate::page::{Page, WaitPolicy};
use crate::readiness;

/// Adapter family. Determines how navigation waits and whether overlays
/// are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterVariant {
    /// Listings are in the initial document; no overlays.
    StandardDom,
    /// Listings render client-side behind consent or location overlays.
    GatedSpa,
}

impl AdapterVariant {
    #[must_use]
    pub fn wait_policy(self) -> WaitPolicy {
        match self {
            AdapterVariant::StandardDom => WaitPolicy::ContentLoaded,
            AdapterVariant::GatedSpa => WaitPolicy::NetworkIdle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteAdapter {
    pub store_id: &'static str,
    pub variant: AdapterVariant,
    /// Selector that must match before extraction starts.
    pub readiness_query: &'static str,
    /// Processed in order; empty for [`AdapterVariant::StandardDom`].
    pub overlays: &'static [OverlaySpec],
    pub rules: ExtractionRules,
}

impl SiteAdapter {
    #[must_use]
    pub fn wait_policy(&self) -> WaitPolicy {
        self.variant.wait_policy()
    }

    /// Waits for the readiness query, saving diagnostics on timeout when a
    /// directory is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Timeout`] if the product list never appears.
    pub async fn wait_for_ready<P: Page + ?Sized>(
        &self,
        page: &P,
        config: &EngineConfig,
    ) -> Result<(), ScrapeError> {
        let result = readiness::wait_for_ready(
            page,
            self.readiness_query,
            config.ready_timeout,
            config.poll_interval,
        )
        .await;

        if result.is_err() {
            if let Some(dir) = &config.diagnostics_dir {
                readiness::capture_diagnostics(page, dir, self.store_id).await;
            }
        }
        result
    }

    pub async fn dismiss_overlays<P: Page + ?Sized>(&self, page: &mut P, config: &EngineConfig) {
        overlay::dismiss_overlays(
            page,
            self.overlays,
            config.poll_interval,
            config.overlay_settle,
        )
        .await;
    }

    /// Extracts candidates and keeps those whose title contains `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Page`] if the snapshot cannot be read or the
    /// extraction rules are invalid.
    pub async fn extract_candidates<P: Page + ?Sized>(
        &self,
        page: &P,
        query: &str,
    ) -> Result<Vec<RawProductNode>, ScrapeError> {
        let nodes = extract::extract_candidates(page, &self.rules).await?;
        let total = nodes.len();
        let kept = filter_by_query(nodes, query);
        tracing::debug!(
            store_id = self.store_id,
            total,
            kept = kept.len(),
            "filtered candidates"
        );
        Ok(kept)
    }
}

/// Looks up the adapter for `store_id`.
///
/// # Errors
///
/// Returns [`ScrapeError::UnknownStore`] when no adapter is registered.
pub fn resolve(store_id: &str) -> Result<&'static SiteAdapter, ScrapeError> {
    catalog::ADAPTERS
        .iter()
        .find(|a| a.store_id == store_id)
        .ok_or_else(|| ScrapeError::UnknownStore {
            store_id: store_id.to_owned(),
        })
}

/// Store ids with a registered adapter, in catalogue order.
pub fn known_store_ids() -> impl Iterator<Item = &'static str> {
    catalog::ADAPTERS.iter().map(|a| a.store_id)
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod tests;
