//! # Search Sync Shared
//!
//! This crate defines the value types shared between the synchronization core and the
//! search index repository: the entity type descriptor and the sync operation kinds.

pub mod types;

pub use types::entity_type::{DestroyedStateSource, EntityType};
pub use types::sync_operation::SyncOperation;
