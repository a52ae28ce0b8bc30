//! The `check` command: runs the scrape pipeline over the selected stores,
//! one at a time on a single page.
//!
//! A failing store is recorded in its report and the run moves on; only the
//! exit status reflects a run where nothing succeeded.

use std::time::Duration;

use clap::{Args, ValueEnum};
use serde::Serialize;
use skuwatch_core::{AppConfig, ProductRecord, StoreProfile, StoresFile};
use skuwatch_scraper::{scrape_store, EngineConfig, ErrorKind, Page, StoreScrapeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BrowserKind {
    /// Plain HTTP fetch; no scripts run
    Static,
    /// Headless Chromium (requires the `chrome` feature)
    Chrome,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    /// Product search term; listings must contain it in their title
    #[arg(long, default_value = "RTX 5080")]
    pub query: String,

    /// Restrict the run to these store ids (repeatable)
    #[arg(long = "store")]
    pub stores: Vec<String>,

    /// Restrict the run to stores in this region, e.g. `US` or `CA`
    #[arg(long)]
    pub region: Option<String>,

    /// Print a JSON array of per-store outcomes instead of tables
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = BrowserKind::Static)]
    pub browser: BrowserKind,
}

/// Result of visiting one store.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub(crate) enum StoreOutcome {
    Products(Vec<ProductRecord>),
    NoMatches,
    Failed(StoreScrapeError),
}

impl StoreOutcome {
    pub(crate) fn from_result(result: Result<Vec<ProductRecord>, StoreScrapeError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => StoreOutcome::NoMatches,
            Ok(records) => StoreOutcome::Products(records),
            Err(err) => StoreOutcome::Failed(err),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StoreReport {
    pub store_id: String,
    pub store_name: String,
    pub outcome: StoreOutcome,
}

/// A store requested for this run.
#[derive(Debug, Clone)]
pub(crate) enum Target {
    Configured(StoreProfile),
    /// Requested with `--store` but absent from the stores file.
    Unconfigured(String),
}

/// Chooses the stores to visit. Explicit `--store` ids win over `--region`;
/// ids missing from the stores file are kept so they can be reported.
pub(crate) fn select_targets(
    stores: &StoresFile,
    requested: &[String],
    region: Option<&str>,
) -> Vec<Target> {
    if requested.is_empty() {
        return stores
            .in_region(region)
            .into_iter()
            .cloned()
            .map(Target::Configured)
            .collect();
    }
    requested
        .iter()
        .map(|id| {
            stores
                .find(id)
                .cloned()
                .map_or_else(|| Target::Unconfigured(id.clone()), Target::Configured)
        })
        .collect()
}

/// `true` when at least one store ran and every one of them failed.
pub(crate) fn all_failed(reports: &[StoreReport]) -> bool {
    !reports.is_empty()
        && reports
            .iter()
            .all(|r| matches!(r.outcome, StoreOutcome::Failed(_)))
}

pub(crate) async fn run(config: &AppConfig, args: &CheckArgs) -> anyhow::Result<Vec<StoreReport>> {
    let stores = skuwatch_core::load_stores(&config.stores_path)?;
    let targets = select_targets(&stores, &args.stores, args.region.as_deref());
    if targets.is_empty() {
        anyhow::bail!(
            "no stores selected; check --region against {}",
            config.stores_path.display()
        );
    }

    let engine = EngineConfig::from_app_config(config);
    let delay = Duration::from_millis(config.inter_store_delay_ms);
    tracing::info!(query = %args.query, stores = targets.len(), "starting check");

    match args.browser {
        BrowserKind::Static => {
            let mut page = skuwatch_scraper::HtmlPage::new(
                config.request_timeout_secs,
                &config.user_agent,
                &config.accept_language,
                config.max_retries,
                config.retry_backoff_base_ms,
            )?;
            Ok(run_targets(&mut page, &targets, &args.query, &engine, delay).await)
        }
        BrowserKind::Chrome => run_in_chrome(config, &targets, &args.query, &engine, delay).await,
    }
}

#[cfg(feature = "chrome")]
async fn run_in_chrome(
    config: &AppConfig,
    targets: &[Target],
    query: &str,
    engine: &EngineConfig,
    delay: Duration,
) -> anyhow::Result<Vec<StoreReport>> {
    let mut page =
        skuwatch_scraper::ChromePage::launch(&config.user_agent, &config.accept_language).await?;
    let reports = run_targets(&mut page, targets, query, engine, delay).await;
    page.close().await;
    Ok(reports)
}

#[cfg(not(feature = "chrome"))]
#[allow(clippy::unused_async)]
async fn run_in_chrome(
    _config: &AppConfig,
    _targets: &[Target],
    _query: &str,
    _engine: &EngineConfig,
    _delay: Duration,
) -> anyhow::Result<Vec<StoreReport>> {
    anyhow::bail!("--browser chrome requires skuwatch to be built with the `chrome` feature")
}

/// Visits each target in order on the same page, pausing `delay` between
/// stores.
pub(crate) async fn run_targets<P: Page + ?Sized>(
    page: &mut P,
    targets: &[Target],
    query: &str,
    engine: &EngineConfig,
    delay: Duration,
) -> Vec<StoreReport> {
    let mut reports = Vec::with_capacity(targets.len());

    for (i, target) in targets.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let report = match target {
            Target::Configured(profile) => StoreReport {
                store_id: profile.id.clone(),
                store_name: profile.name.clone(),
                outcome: StoreOutcome::from_result(
                    scrape_store(page, profile, query, engine).await,
                ),
            },
            Target::Unconfigured(id) => {
                tracing::warn!(store_id = %id, "store is not configured");
                StoreReport {
                    store_id: id.clone(),
                    store_name: id.clone(),
                    outcome: StoreOutcome::Failed(StoreScrapeError {
                        store_id: id.clone(),
                        kind: ErrorKind::Configuration,
                        message: format!("store \"{id}\" is not in the stores file"),
                    }),
                }
            }
        };
        reports.push(report);
    }

    reports
}
