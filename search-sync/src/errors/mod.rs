//! Error types for the synchronization core.

use search_sync_repository::SearchIndexError;
use search_sync_shared::SyncOperation;
use thiserror::Error;

/// Errors raised while projecting an entity into an indexable document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// A field required by the document is absent on the instance.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The instance could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The instance serialized to something other than a JSON object.
    #[error("Projection did not produce a JSON object")]
    NotAnObject,
}

impl ProjectionError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Errors surfaced to the caller of a lifecycle notification.
///
/// The primary store's write has already committed when these are returned; they
/// only report that the index could not be brought in line with it.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The instance could not be projected; nothing was sent to the index.
    #[error("Failed to project {entity_type} {identity}: {source}")]
    Projection {
        entity_type: String,
        identity: String,
        #[source]
        source: ProjectionError,
    },

    /// The index client rejected or failed the write.
    #[error("Failed to {operation} {entity_type} {identity} in the search index: {source}")]
    IndexWrite {
        entity_type: String,
        identity: String,
        operation: SyncOperation,
        #[source]
        source: SearchIndexError,
    },

    /// A bulk write was rejected as a whole.
    #[error("Failed to reindex {entity_type} ({operation} batch): {source}")]
    BatchWrite {
        entity_type: String,
        operation: SyncOperation,
        #[source]
        source: SearchIndexError,
    },

    /// Configuration or wiring error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The index operation that failed, if any.
    pub fn operation(&self) -> Option<SyncOperation> {
        match self {
            Self::IndexWrite { operation, .. } => Some(*operation),
            Self::BatchWrite { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_write_message() {
        let err = SyncError::IndexWrite {
            entity_type: "Article".to_string(),
            identity: "42".to_string(),
            operation: SyncOperation::Delete,
            source: SearchIndexError::delete("cluster unavailable"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to delete Article 42 in the search index: Delete error: cluster unavailable"
        );
        assert_eq!(err.operation(), Some(SyncOperation::Delete));
    }

    #[test]
    fn test_batch_write_message() {
        let err = SyncError::BatchWrite {
            entity_type: "Article".to_string(),
            operation: SyncOperation::Delete,
            source: SearchIndexError::bulk_operation("cluster unavailable"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to reindex Article (delete batch): Bulk index error: cluster unavailable"
        );
        assert_eq!(err.operation(), Some(SyncOperation::Delete));
    }

    #[test]
    fn test_projection_message() {
        let err = SyncError::Projection {
            entity_type: "Article".to_string(),
            identity: "42".to_string(),
            source: ProjectionError::missing_field("title"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to project Article 42: Missing required field: title"
        );
        assert_eq!(err.operation(), None);
    }
}
