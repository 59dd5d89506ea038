//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationSummary, DeleteDocumentRequest, UpsertDocumentRequest};

/// Abstracts the underlying search index implementation.
///
/// Implementations are wrapped by `IndexClient`, which validates requests before they
/// reach the provider, so providers may assume well-formed index names and ids.
///
/// Both document operations are idempotent: repeating an upsert leaves the same
/// document in place, and deleting a document that does not exist succeeds.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the given index exists, creating it if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If inspection or creation fails
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Create or replace a document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SearchIndexError)` - If the operation fails
    async fn upsert_document(&self, request: &UpsertDocumentRequest)
        -> Result<(), SearchIndexError>;

    /// Delete a document from the search index.
    ///
    /// If the document doesn't exist, the operation is considered successful.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted (or didn't exist)
    /// * `Err(SearchIndexError)` - If the deletion fails
    async fn delete_document(&self, request: &DeleteDocumentRequest)
        -> Result<(), SearchIndexError>;

    /// Upsert multiple documents and return a summary of successful and failed operations.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Contains aggregate statistics and individual results
    /// * `Err(SearchIndexError)` - If the bulk operation fails entirely
    async fn bulk_upsert_documents(
        &self,
        requests: &[UpsertDocumentRequest],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Delete multiple documents and return a summary of successful and failed operations.
    ///
    /// Documents that don't exist are considered successful deletions.
    async fn bulk_delete_documents(
        &self,
        requests: &[DeleteDocumentRequest],
    ) -> Result<BatchOperationSummary, SearchIndexError>;
}
