//! Index client implementation.
//!
//! This module provides the service the synchronization core talks to. It
//! validates requests, resolves physical index names and enforces batch limits
//! before delegating to a `SearchIndexProvider`.

use std::sync::Arc;

use crate::config::IndexClientConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{BatchOperationSummary, DeleteDocumentRequest, UpsertDocumentRequest};
use crate::utils::{validate_document_id, validate_index_name};

/// The high-level API for writing to the search index.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use search_sync_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use search_sync_repository::{Document, IndexClient, UpsertDocumentRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?;
/// let client = IndexClient::new(Arc::new(provider));
///
/// let mut document = Document::new();
/// document.insert("title".to_string(), "Hello".into());
///
/// client
///     .upsert(UpsertDocumentRequest {
///         index: "articles".to_string(),
///         document_id: "42".to_string(),
///         document,
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IndexClient {
    provider: Arc<dyn SearchIndexProvider>,
    config: IndexClientConfig,
}

impl IndexClient {
    /// Create a new IndexClient with default configuration.
    ///
    /// The default configuration includes a batch size limit of 1000 documents.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: IndexClientConfig::default(),
        }
    }

    /// Create a new IndexClient with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: IndexClientConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &IndexClientConfig {
        &self.config
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.batch_limit() {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Resolve the physical index name and validate it.
    fn resolve_index(&self, index: &str) -> Result<String, SearchIndexError> {
        let resolved = self.config.resolve_index(index);
        validate_index_name(&resolved)?;
        Ok(resolved)
    }

    /// Ensure an index exists, creating it with the provider's settings if needed.
    pub async fn ensure_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let index = self.resolve_index(index)?;
        self.provider.ensure_index_exists(&index).await
    }

    /// Create or replace a document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SearchIndexError::ValidationError)` - If the index name or id is invalid
    /// * `Err(SearchIndexError)` - If the provider fails
    pub async fn upsert(&self, mut request: UpsertDocumentRequest) -> Result<(), SearchIndexError> {
        request.index = self.resolve_index(&request.index)?;
        validate_document_id(&request.document_id)?;

        self.provider.upsert_document(&request).await
    }

    /// Delete a document. A document that does not exist is not an error.
    pub async fn delete(&self, mut request: DeleteDocumentRequest) -> Result<(), SearchIndexError> {
        request.index = self.resolve_index(&request.index)?;
        validate_document_id(&request.document_id)?;

        self.provider.delete_document(&request).await
    }

    /// Upsert multiple documents in bulk.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document results; item failures do not fail the call
    /// * `Err(SearchIndexError::BatchSizeExceeded)` - If the batch exceeds the configured limit
    /// * `Err(SearchIndexError::ValidationError)` - If any request is invalid
    pub async fn batch_upsert(
        &self,
        mut requests: Vec<UpsertDocumentRequest>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if requests.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(requests.len())?;

        for request in &mut requests {
            request.index = self.resolve_index(&request.index)?;
            validate_document_id(&request.document_id)?;
        }

        self.provider.bulk_upsert_documents(&requests).await
    }

    /// Delete multiple documents in bulk.
    ///
    /// Documents that don't exist are considered successful deletions.
    pub async fn batch_delete(
        &self,
        mut requests: Vec<DeleteDocumentRequest>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if requests.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(requests.len())?;

        for request in &mut requests {
            request.index = self.resolve_index(&request.index)?;
            validate_document_id(&request.document_id)?;
        }

        self.provider.bulk_delete_documents(&requests).await
    }
}
