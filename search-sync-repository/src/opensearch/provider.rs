//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, IndexParts, OpenSearch,
};
use search_sync_shared::SyncOperation;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::types::{
    BatchOperationResult, BatchOperationSummary, DeleteDocumentRequest, UpsertDocumentRequest,
};

/// OpenSearch provider implementation.
///
/// Documents are written with the index API, so an upsert replaces the stored
/// document as a whole and repeated upserts of the same projection converge.
///
/// # Example
///
/// ```ignore
/// use search_sync_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?;
/// provider.ensure_index_exists("articles").await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - Settings used when creating missing indices
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            number_of_shards = index_config.number_of_shards,
            number_of_replicas = index_config.number_of_replicas,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Whether a delete response status means the document is gone.
    ///
    /// 404 is acceptable: the document may never have been indexed.
    fn delete_succeeded(status: u16) -> bool {
        (200..300).contains(&status) || status == 404
    }

    /// Whether a failed create-index response was caused by a concurrent creation.
    fn is_already_exists(status: u16, body: &str) -> bool {
        status == 400 && body.contains("resource_already_exists_exception")
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }
        if status.as_u16() != 404 {
            return Err(SearchIndexError::index_creation(format!(
                "Index existence check for '{}' failed with status {}",
                index, status
            )));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(self.index_config.index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if Self::is_already_exists(status.as_u16(), &error_body) {
                debug!(index = %index, "Index created concurrently");
                return Ok(());
            }
            error!(
                index = %index,
                status = %status,
                body = %error_body,
                "Create index request failed"
            );
            return Err(SearchIndexError::index_creation(format!(
                "Create index '{}' failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Created index");
        Ok(())
    }

    async fn upsert_document(
        &self,
        request: &UpsertDocumentRequest,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&request.index, &request.document_id))
            .body(&request.document)
            .send()
            .await
            .map_err(|e| SearchIndexError::upsert(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Upsert request failed");
            return Err(SearchIndexError::upsert(format!(
                "Upsert failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %request.index, document_id = %request.document_id, "Document upserted");
        Ok(())
    }

    async fn delete_document(
        &self,
        request: &DeleteDocumentRequest,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&request.index, &request.document_id))
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();
        if !Self::delete_succeeded(status.as_u16()) {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %request.index, document_id = %request.document_id, "Document deleted");
        Ok(())
    }

    async fn bulk_upsert_documents(
        &self,
        requests: &[UpsertDocumentRequest],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = SearchIndexProvider::upsert_document(self, request).await;
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
            let outcome = SearchIndexProvider::delete_document(self, request).await;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_succeeded() {
        assert!(OpenSearchProvider::delete_succeeded(200));
        assert!(OpenSearchProvider::delete_succeeded(404));
        assert!(!OpenSearchProvider::delete_succeeded(409));
        assert!(!OpenSearchProvider::delete_succeeded(503));
    }

    #[test]
    fn test_is_already_exists() {
        let body = r#"{"error":{"type":"resource_already_exists_exception"},"status":400}"#;
        assert!(OpenSearchProvider::is_already_exists(400, body));
        assert!(!OpenSearchProvider::is_already_exists(400, "mapper_parsing_exception"));
        assert!(!OpenSearchProvider::is_already_exists(500, body));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchProvider::new("not a url", IndexConfig::default()).await;
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_new_accepts_valid_url() {
        let result = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await;
        assert!(result.is_ok());
    }
}
