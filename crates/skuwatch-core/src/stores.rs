use std::collections::HashSet;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::products::Currency;
use crate::ConfigError;

/// Placeholder in [`StoreProfile::search_url`] replaced by the encoded query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// One retailer + region pair to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    /// Registry key, e.g. `"bestbuy-ca"`.
    pub id: String,
    /// Human-readable name, e.g. `"Best Buy Canada"`.
    pub name: String,
    /// Search page URL with a `{query}` placeholder.
    pub search_url: String,
    pub region: Option<String>,
    /// Overrides the region's default currency.
    pub currency: Option<Currency>,
}

impl StoreProfile {
    /// The currency prices on this store are listed in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
            .unwrap_or_else(|| Currency::for_region(self.region.as_deref()))
    }

    /// Build the search page URL for `query`, percent-encoding the term.
    #[must_use]
    pub fn search_url_for(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        self.search_url.replace(QUERY_PLACEHOLDER, &encoded)
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreProfile>,
}

impl StoresFile {
    /// Profiles whose region matches `region` (case-insensitive). Profiles
    /// without a region only match when `region` is `None`.
    #[must_use]
    pub fn in_region(&self, region: Option<&str>) -> Vec<&StoreProfile> {
        self.stores
            .iter()
            .filter(|s| match (region, s.region.as_deref()) {
                (None, _) => true,
                (Some(want), Some(have)) => want.eq_ignore_ascii_case(have),
                (Some(_), None) => false,
            })
            .collect()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&StoreProfile> {
        self.stores.iter().find(|s| s.id == id)
    }
}

/// Load and validate store profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile = serde_yaml::from_str(&content)?;

    validate_stores(&stores_file)?;

    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in &stores_file.stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store id must be non-empty".to_string(),
            ));
        }

        if !store
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "store id '{}' must contain only lowercase letters, digits and '-'",
                store.id
            )));
        }

        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty name",
                store.id
            )));
        }

        if !(store.search_url.starts_with("https://") || store.search_url.starts_with("http://"))
        {
            return Err(ConfigError::Validation(format!(
                "store '{}' search_url must be an http(s) URL",
                store.id
            )));
        }

        if !store.search_url.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "store '{}' search_url is missing the {QUERY_PLACEHOLDER} placeholder",
                store.id
            )));
        }

        if !seen_ids.insert(store.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
