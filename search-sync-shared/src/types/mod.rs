//! This module defines the core data structures used across the search sync crates.
//! It re-exports specific types like `EntityType` and `SyncOperation`.

pub mod entity_type;
pub mod sync_operation;

pub use entity_type::{DestroyedStateSource, EntityType};
pub use sync_operation::SyncOperation;
