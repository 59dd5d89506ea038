//! # Search Sync Repository
//!
//! This crate provides the index client used by the synchronization core. It
//! includes the error type, the `SearchIndexProvider` interface, the validating
//! `IndexClient` service, a concrete OpenSearch provider and an in-memory
//! provider for tests and local development.

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod types;
pub mod utils;

pub use client::IndexClient;
pub use config::IndexClientConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use memory::InMemoryProvider;
pub use opensearch::OpenSearchProvider;
pub use types::{
    BatchOperationResult, BatchOperationSummary, DeleteDocumentRequest, Document,
    UpsertDocumentRequest,
};
pub use utils::{validate_document_id, validate_index_name};
