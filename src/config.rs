//! Configuration Module
//!
//! Handles loading and validating cache limits from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default aggregate byte budget (64 MiB)
pub const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Default time-to-live in seconds (1 hour)
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Cache limits and policy switches.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum aggregate size of all entries in bytes
    pub max_bytes: usize,
    /// Lifetime in seconds applied uniformly to every entry
    pub ttl_secs: u64,
    /// Remove older entries with the same key before inserting a new one
    pub dedupe_on_put: bool,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `QUERY_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `QUERY_CACHE_MAX_BYTES` - Byte budget (default: 67108864)
    /// - `QUERY_CACHE_TTL` - TTL in seconds (default: 3600)
    /// - `QUERY_CACHE_DEDUPE` - Replace same-key entries on put (default: false);
    ///   accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("QUERY_CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            max_bytes: parse_var("QUERY_CACHE_MAX_BYTES").unwrap_or(defaults.max_bytes),
            ttl_secs: parse_var("QUERY_CACHE_TTL").unwrap_or(defaults.ttl_secs),
            dedupe_on_put: parse_flag("QUERY_CACHE_DEDUPE").unwrap_or(defaults.dedupe_on_put),
        }
    }

    /// Rejects limits under which no entry could ever be stored.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be greater than 0".to_string(),
            ));
        }
        if self.max_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "max_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// TTL expressed in milliseconds, the resolution of entry timestamps.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_secs.saturating_mul(1000)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_bytes: DEFAULT_MAX_BYTES,
            ttl_secs: DEFAULT_TTL_SECS,
            dedupe_on_put: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
