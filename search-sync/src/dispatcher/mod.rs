//! Dispatcher module for lifecycle notifications.
//!
//! Turns "after upsert" and "after remove" notifications into index writes.

mod sync_dispatcher;

pub use sync_dispatcher::{SkipReason, SyncDispatcher, SyncOutcome};
