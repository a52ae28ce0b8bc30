use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Desktop Chrome identity. Several retailers serve a bot wall to anything
/// that does not look like a mainstream browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SKUWATCH_ENV", "development"))?;
    let log_level = or_default("SKUWATCH_LOG_LEVEL", "info");
    let stores_path = PathBuf::from(or_default("SKUWATCH_STORES_PATH", "./config/stores.yaml"));

    let user_agent = or_default("SKUWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("SKUWATCH_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);
    let request_timeout_secs = parse_u64("SKUWATCH_REQUEST_TIMEOUT_SECS", "30")?;

    let ready_timeout_ms = parse_u64("SKUWATCH_READY_TIMEOUT_MS", "10000")?;
    let overlay_settle_ms = parse_u64("SKUWATCH_OVERLAY_SETTLE_MS", "1000")?;
    let poll_interval_ms = parse_u64("SKUWATCH_POLL_INTERVAL_MS", "250")?;
    if poll_interval_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SKUWATCH_POLL_INTERVAL_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    // An explicitly empty value turns diagnostic capture off.
    let diagnostics_dir = match lookup("SKUWATCH_DIAGNOSTICS_DIR") {
        Ok(raw) if raw.trim().is_empty() => None,
        Ok(raw) => Some(PathBuf::from(raw)),
        Err(_) => Some(PathBuf::from("./diagnostics")),
    };

    let inter_store_delay_ms = parse_u64("SKUWATCH_INTER_STORE_DELAY_MS", "500")?;
    let max_retries = parse_u32("SKUWATCH_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("SKUWATCH_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        stores_path,
        user_agent,
        accept_language,
        request_timeout_secs,
        ready_timeout_ms,
        overlay_settle_ms,
        poll_interval_ms,
        diagnostics_dir,
        inter_store_delay_ms,
        max_retries,
        retry_backoff_base_ms,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SKUWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
