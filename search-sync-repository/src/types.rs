//! Request and response types for search index operations.

use search_sync_shared::SyncOperation;
use serde_json::{Map, Value};

use crate::errors::SearchIndexError;

/// An indexable document: the JSON object produced by projecting an entity.
pub type Document = Map<String, Value>;

/// Request to create or replace a document in the search index.
///
/// The stored document is replaced as a whole, so repeating the same request
/// leaves the index in the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertDocumentRequest {
    /// Name of the target index.
    pub index: String,
    /// The entity identity used as document id.
    pub document_id: String,
    /// The projected document body.
    pub document: Document,
}

/// Request to delete a document from the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDocumentRequest {
    /// Name of the target index.
    pub index: String,
    /// The entity identity used as document id.
    pub document_id: String,
}

/// Result of a batch operation for a single document.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    pub index: String,
    pub document_id: String,
    pub operation: SyncOperation,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    /// Build a result from the outcome of a single operation.
    pub fn from_outcome(
        index: &str,
        document_id: &str,
        operation: SyncOperation,
        outcome: Result<(), SearchIndexError>,
    ) -> Self {
        let error = outcome.err();
        Self {
            index: index.to_string(),
            document_id: document_id.to_string(),
            operation,
            success: error.is_none(),
            error,
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Callers inspect `failed` and `results` to handle partial failures.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// An empty summary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from individual results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Fold another summary into this one, keeping result order.
    pub fn merge(&mut self, other: BatchOperationSummary) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.results.extend(other.results);
    }

    /// Iterate over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, outcome: Result<(), SearchIndexError>) -> BatchOperationResult {
        BatchOperationResult::from_outcome("articles", id, SyncOperation::Upsert, outcome)
    }

    #[test]
    fn test_summary_from_results() {
        let summary = BatchOperationSummary::from_results(vec![
            result("1", Ok(())),
            result("2", Err(SearchIndexError::upsert("down"))),
            result("3", Ok(())),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        let failed: Vec<_> = summary.failures().map(|r| r.document_id.as_str()).collect();
        assert_eq!(failed, vec!["2"]);
    }

    #[test]
    fn test_summary_merge() {
        let mut summary = BatchOperationSummary::from_results(vec![result("1", Ok(()))]);
        summary.merge(BatchOperationSummary::from_results(vec![result(
            "2",
            Err(SearchIndexError::upsert("down")),
        )]));

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.results[1].document_id, "2");
    }
}
