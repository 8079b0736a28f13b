//! Runtime configuration read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.attos.world";
pub const DEFAULT_PREVIEW_URL: &str = "https://api.ociswap.com/preview/add-liquidity";

/// Lifetime of cached per-account data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnConfig {
    /// Base URL of the aggregation backend.
    pub api_url: String,
    /// Add-liquidity preview endpoint.
    pub preview_url: String,
    pub cache: CacheConfig,
    pub search_debounce: Duration,
}

impl Default for EarnConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            preview_url: DEFAULT_PREVIEW_URL.to_string(),
            cache: CacheConfig::default(),
            search_debounce: Duration::from_millis(300),
        }
    }
}

impl EarnConfig {
    /// Reads `EARN_*` variables, keeping defaults for anything unset.
    /// Unparsable numbers are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EarnConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("EARN_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("EARN_PREVIEW_URL") {
            config.preview_url = url;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "EARN_CACHE_TTL_SECS") {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "EARN_SEARCH_DEBOUNCE_MS") {
            config.search_debounce = Duration::from_millis(ms);
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}
