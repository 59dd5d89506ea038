//! Search index error types.
//!
//! This module defines the unified error type for index client operations,
//! covering both backend failures and request validation.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Returned by every `SearchIndexProvider` method and by `IndexClient`. The type is
/// `Clone` so that batch summaries can carry per-document failures.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., empty document id, invalid index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create or inspect an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to write a document.
    #[error("Upsert error: {0}")]
    UpsertError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Bulk operation failed as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an upsert error.
    pub fn upsert(msg: impl Into<String>) -> Self {
        Self::UpsertError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchIndexError::upsert("boom").to_string(),
            "Upsert error: boom"
        );
        assert_eq!(
            SearchIndexError::batch_size_exceeded(5, 2).to_string(),
            "Batch size 5 exceeds maximum 2"
        );
    }
}
