use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Production runs log without ANSI colors.
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Runtime settings for a check run, resolved from `SKUWATCH_*` environment
/// variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub stores_path: PathBuf,
    /// Identity headers sent with every navigation.
    pub user_agent: String,
    pub accept_language: String,
    pub request_timeout_secs: u64,
    /// Upper bound on waiting for a store's product list to render.
    pub ready_timeout_ms: u64,
    /// Pause after clicking an overlay so it can finish closing.
    pub overlay_settle_ms: u64,
    pub poll_interval_ms: u64,
    /// Where readiness-timeout snapshots are written. `None` disables capture.
    pub diagnostics_dir: Option<PathBuf>,
    pub inter_store_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
