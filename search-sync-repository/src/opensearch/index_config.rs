//! OpenSearch index configuration.
//!
//! Entity documents are arbitrary projections, so indices are created with
//! dynamic mappings and only shard settings are fixed here.

use serde_json::{json, Value};

/// Settings applied when the provider creates a missing index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Number of primary shards.
    pub number_of_shards: u32,
    /// Number of replicas per shard.
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            number_of_shards,
            number_of_replicas,
        }
    }

    /// Body of the create-index request.
    ///
    /// - **dynamic mapping**: field types are inferred from the projected documents
    /// - **date detection**: RFC 3339 strings are mapped as dates
    pub fn index_settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            },
            "mappings": {
                "dynamic": true,
                "date_detection": true
            }
        })
    }
}
