//! Configuration types for the IndexClient.

/// Configuration for the IndexClient.
///
/// Controls batch operation limits and the optional prefix applied to every
/// index name, which lets several environments share one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexClientConfig {
    /// Maximum number of documents allowed in a single batch operation.
    ///
    /// Set to `None` (or `Some(0)`) to disable the limit (not recommended for
    /// production). Defaults to 1000 if not specified.
    pub max_batch_size: Option<usize>,

    /// Prefix joined to every index name with an underscore (`staging` + `articles`
    /// becomes `staging_articles`).
    pub index_prefix: Option<String>,
}

impl Default for IndexClientConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
            index_prefix: None,
        }
    }
}

impl IndexClientConfig {
    /// Create a config with no batch size limit.
    ///
    /// # Warning
    ///
    /// Use with caution. Removing batch size limits can lead to memory issues
    /// and timeouts when processing very large batches.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Self::default()
        }
    }

    /// Create a config with a custom batch size limit; `0` means unlimited.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size).filter(|&max| max > 0),
            ..Self::default()
        }
    }

    /// The enforced batch limit, treating `Some(0)` as unlimited.
    pub fn batch_limit(&self) -> Option<usize> {
        self.max_batch_size.filter(|&max| max > 0)
    }

    /// Set the index prefix.
    pub fn index_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.index_prefix = Some(prefix.into());
        self
    }

    /// Resolve the physical index name for a logical one.
    pub fn resolve_index(&self, index: &str) -> String {
        match self.index_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{}_{}", prefix, index),
            _ => index.to_string(),
        }
    }
}
