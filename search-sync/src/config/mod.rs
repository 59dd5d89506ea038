//! Configuration and dependency initialization.
//!
//! Settings are read from environment variables (a `.env` file is loaded by the
//! binary). `SyncSettings::from_lookup` takes any key lookup so parsing can be
//! exercised without touching the process environment.

mod dependencies;

pub use dependencies::{ConnectionMode, Dependencies};

use std::env;
use std::time::Duration;

use search_sync_repository::opensearch::IndexConfig;
use search_sync_repository::IndexClientConfig;
use tracing::warn;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Default maximum batch size for bulk writes.
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Settings for wiring the synchronization core to an OpenSearch cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub opensearch_url: String,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    /// Settings used when creating missing indices.
    pub index_config: IndexConfig,
    /// Batch limit and index prefix applied by the index client.
    pub client_config: IndexClientConfig,
    /// Whether newly registered entity types start with sync disabled.
    pub start_disabled: bool,
    /// Indices the bootstrap binary ensures exist.
    pub indices: Vec<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SyncSettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `INDEX_PREFIX`: Prefix joined to every index name (default: none)
    /// - `INDEX_SHARDS` / `INDEX_REPLICAS`: Settings for created indices (default: 1 / 1)
    /// - `SEARCH_SYNC_MAX_BATCH_SIZE`: Bulk write limit, 0 for unlimited (default: 1000)
    /// - `SEARCH_SYNC_START_DISABLED`: Register types with sync disabled (default: false)
    /// - `SEARCH_SYNC_INDICES`: Comma-separated indices to ensure at startup (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let connection_mode =
            ConnectionMode::parse(lookup("OPENSEARCH_CONNECTION_MODE").as_deref());
        let retry_interval = Duration::from_secs(parse_or(
            &lookup,
            "OPENSEARCH_RETRY_INTERVAL_SECS",
            DEFAULT_RETRY_INTERVAL_SECS,
        ));

        let defaults = IndexConfig::default();
        let index_config = IndexConfig::new(
            parse_or(&lookup, "INDEX_SHARDS", defaults.number_of_shards),
            parse_or(&lookup, "INDEX_REPLICAS", defaults.number_of_replicas),
        );

        let max_batch_size =
            match parse_or(&lookup, "SEARCH_SYNC_MAX_BATCH_SIZE", DEFAULT_MAX_BATCH_SIZE) {
                0 => None,
                n => Some(n),
            };
        let client_config = IndexClientConfig {
            max_batch_size,
            index_prefix: lookup("INDEX_PREFIX").filter(|p| !p.trim().is_empty()),
        };

        let start_disabled = parse_bool(&lookup, "SEARCH_SYNC_START_DISABLED");

        let indices = lookup("SEARCH_SYNC_INDICES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            opensearch_url,
            connection_mode,
            retry_interval,
            index_config,
            client_config,
            start_disabled,
            indices,
        }
    }
}

/// Parse a numeric variable, falling back to the default when unset or invalid.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = %key, value = %raw, "Invalid value, using default");
            default
        }),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") => false,
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        Some(other) => {
            warn!(key = %key, value = %other, "Invalid boolean, using false");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> SyncSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SyncSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();

        assert_eq!(settings.opensearch_url, "http://localhost:9200");
        assert_eq!(settings.connection_mode, ConnectionMode::Retry);
        assert_eq!(settings.retry_interval, Duration::from_secs(15));
        assert_eq!(settings.index_config, IndexConfig::default());
        assert_eq!(settings.client_config, IndexClientConfig::default());
        assert!(!settings.start_disabled);
        assert!(settings.indices.is_empty());
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("OPENSEARCH_URL", "http://search:9200"),
            ("OPENSEARCH_CONNECTION_MODE", "fail-fast"),
            ("OPENSEARCH_RETRY_INTERVAL_SECS", "3"),
            ("INDEX_PREFIX", "staging"),
            ("INDEX_SHARDS", "2"),
            ("INDEX_REPLICAS", "0"),
            ("SEARCH_SYNC_MAX_BATCH_SIZE", "250"),
            ("SEARCH_SYNC_START_DISABLED", "true"),
            ("SEARCH_SYNC_INDICES", "articles, comments,,"),
        ]);

        assert_eq!(settings.opensearch_url, "http://search:9200");
        assert_eq!(settings.connection_mode, ConnectionMode::FailFast);
        assert_eq!(settings.retry_interval, Duration::from_secs(3));
        assert_eq!(settings.index_config, IndexConfig::new(2, 0));
        assert_eq!(settings.client_config.max_batch_size, Some(250));
        assert_eq!(settings.client_config.index_prefix.as_deref(), Some("staging"));
        assert!(settings.start_disabled);
        assert_eq!(settings.indices, vec!["articles", "comments"]);
    }

    #[test]
    fn test_zero_batch_size_is_unlimited() {
        let settings = settings(&[("SEARCH_SYNC_MAX_BATCH_SIZE", "0")]);
        assert_eq!(settings.client_config.max_batch_size, None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let settings = settings(&[
            ("OPENSEARCH_RETRY_INTERVAL_SECS", "soon"),
            ("SEARCH_SYNC_MAX_BATCH_SIZE", "-1"),
            ("SEARCH_SYNC_START_DISABLED", "maybe"),
            ("OPENSEARCH_CONNECTION_MODE", "sometimes"),
        ]);

        assert_eq!(settings.retry_interval, Duration::from_secs(15));
        assert_eq!(settings.client_config.max_batch_size, Some(1000));
        assert!(!settings.start_disabled);
        assert_eq!(settings.connection_mode, ConnectionMode::Retry);
    }

    #[test]
    fn test_blank_prefix_is_ignored() {
        let settings = settings(&[("INDEX_PREFIX", "  ")]);
        assert_eq!(settings.client_config.index_prefix, None);
    }
}
