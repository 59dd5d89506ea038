//! Index operations produced by the sync dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The index write a lifecycle notification resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOperation {
    /// Create or replace the instance's document.
    Upsert,
    /// Remove the instance's document.
    Delete,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upsert => f.write_str("upsert"),
            Self::Delete => f.write_str("delete"),
        }
    }
}
