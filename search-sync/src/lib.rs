//! # Search Sync
//!
//! Keeps a search index in sync with the primary data store by reacting to
//! entity lifecycle notifications.
//!
//! ## Architecture
//!
//! 1. **Registry**: entity types opt in by registering an `EntityType`
//! 2. **Switch**: per-type enable/disable, bulk toggles and scoped suspension
//! 3. **Tracker**: fallback destroyed flag for stores that do not expose one
//! 4. **Dispatcher**: turns "after upsert" / "after remove" into index writes
//!
//! The primary store's hooks call [`SyncDispatcher::on_after_upsert`] and
//! [`SyncDispatcher::on_after_remove`]; entity types only implement
//! [`Synchronizable`].
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency wiring
//! - [`destroyed`]: Destroyed-state tracker
//! - [`dispatcher`]: Lifecycle notification dispatch
//! - [`entity`]: The `Synchronizable` capability
//! - [`errors`]: Error types
//! - [`registry`]: Type registry
//! - [`switch`]: Sync switch operations

pub mod config;
pub mod destroyed;
pub mod dispatcher;
pub mod entity;
pub mod errors;
pub mod registry;
pub mod switch;

pub use config::{ConnectionMode, Dependencies, SyncSettings};
pub use destroyed::DestroyedTracker;
pub use dispatcher::{SkipReason, SyncDispatcher, SyncOutcome};
pub use entity::{serialize_document, Synchronizable};
pub use errors::{ProjectionError, SyncError};
pub use registry::{RegisteredType, TypeRegistry};
pub use switch::SyncSuspension;
