//! In-memory search index provider.
//!
//! Keeps documents in a map keyed by index and document id. Last write wins,
//! mirroring the index layer's conflict behaviour. Used for tests and local
//! development without an OpenSearch cluster.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use search_sync_shared::SyncOperation;
use tracing::debug;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{
    BatchOperationResult, BatchOperationSummary, DeleteDocumentRequest, Document,
    UpsertDocumentRequest,
};

/// In-memory storage backend for testing/development.
#[derive(Default)]
pub struct InMemoryProvider {
    indices: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored document.
    pub fn get(&self, index: &str, document_id: &str) -> Option<Document> {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices
            .get(index)
            .and_then(|documents| documents.get(document_id))
            .cloned()
    }

    /// Number of documents stored in an index.
    pub fn count(&self, index: &str) -> usize {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.get(index).map_or(0, HashMap::len)
    }

    /// Whether an index has been created (explicitly or by a write).
    pub fn has_index(&self, index: &str) -> bool {
        let indices = self.indices.read().unwrap_or_else(PoisonError::into_inner);
        indices.contains_key(index)
    }
}

#[async_trait]
impl SearchIndexProvider for InMemoryProvider {
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        let mut indices = self.indices.write().unwrap_or_else(PoisonError::into_inner);
        indices.entry(index.to_string()).or_default();
        Ok(())
    }

    async fn upsert_document(
        &self,
        request: &UpsertDocumentRequest,
    ) -> Result<(), SearchIndexError> {
        let mut indices = self.indices.write().unwrap_or_else(PoisonError::into_inner);
        indices
            .entry(request.index.clone())
            .or_default()
            .insert(request.document_id.clone(), request.document.clone());

        debug!(index = %request.index, document_id = %request.document_id, "Document stored");
        Ok(())
    }

    async fn delete_document(
        &self,
        request: &DeleteDocumentRequest,
    ) -> Result<(), SearchIndexError> {
        let mut indices = self.indices.write().unwrap_or_else(PoisonError::into_inner);
        let removed = indices
            .get_mut(&request.index)
            .and_then(|documents| documents.remove(&request.document_id))
            .is_some();

        debug!(
            index = %request.index,
            document_id = %request.document_id,
            removed,
            "Document deleted"
        );
        Ok(())
    }

    async fn bulk_upsert_documents(
        &self,
        requests: &[UpsertDocumentRequest],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self.upsert_document(request).await;
            results.push(BatchOperationResult::from_outcome(
                &request.index,
                &request.document_id,
                SyncOperation::Upsert,
                outcome,
            ));
        }
        Ok(BatchOperationSummary::from_results(results))
    }

    async fn bulk_delete_documents(
        &self,
        requests: &[DeleteDocumentRequest],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self.delete_document(request).await;
            results.push(BatchOperationResult::from_outcome(
                &request.index,
                &request.document_id,
                SyncOperation::Delete,
                outcome,
            ));
        }
        Ok(BatchOperationSummary::from_results(results))
    }
}
