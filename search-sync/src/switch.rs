//! Sync switch: per-type enable/disable of index synchronization.
//!
//! Flags are atomics read on every lifecycle notification and written only by
//! administrative toggles. A notification that already passed the check is not
//! cancelled by a later toggle. Bulk toggles walk the registry in order and are
//! not atomic across types. Suspensions are counted separately from the
//! explicit flags, so they nest and never overwrite a toggle.

use std::sync::Arc;

use tracing::{debug, info};

use crate::registry::{RegisteredType, TypeRegistry};

impl TypeRegistry {
    /// Disable synchronization for a type.
    ///
    /// Unknown names are a no-op. Returns `true` when the type is registered.
    pub fn disable(&self, name: &str) -> bool {
        self.set_disabled(name, true)
    }

    /// Enable synchronization for a type.
    ///
    /// Unknown names are a no-op. Returns `true` when the type is registered.
    pub fn enable(&self, name: &str) -> bool {
        self.set_disabled(name, false)
    }

    /// Disable every registered type, in registration order.
    pub fn disable_all(&self) {
        for entry in self.entries() {
            entry.set_disabled(true);
        }
        info!(types = self.len(), "Disabled index sync for all entity types");
    }

    /// Enable every registered type, in registration order.
    pub fn enable_all(&self) {
        for entry in self.entries() {
            entry.set_disabled(false);
        }
        info!(types = self.len(), "Enabled index sync for all entity types");
    }

    /// Whether lifecycle notifications for the type currently reach the index.
    ///
    /// A name that was never registered has never been customized and reports `true`.
    pub fn is_active_for(&self, name: &str) -> bool {
        self.get(name).map_or(true, |entry| entry.is_active())
    }

    /// Suspend every registered type until the returned guard is dropped.
    ///
    /// Suspensions nest: a type resumes only once every guard covering it is
    /// gone. The explicit enable/disable flags are never written, so a
    /// `disable` issued while suspended still holds after resuming. Types
    /// registered while suspended are not covered.
    ///
    /// # Example
    ///
    /// ```
    /// use search_sync::TypeRegistry;
    /// use search_sync_shared::EntityType;
    ///
    /// let registry = TypeRegistry::new();
    /// registry.register(EntityType::new("Article"));
    /// registry.register(EntityType::new("Comment"));
    /// registry.disable("Comment");
    ///
    /// {
    ///     let _suspension = registry.suspend_all();
    ///     assert!(!registry.is_active_for("Article"));
    /// }
    ///
    /// assert!(registry.is_active_for("Article"));
    /// assert!(!registry.is_active_for("Comment"));
    /// ```
    pub fn suspend_all(&self) -> SyncSuspension {
        let entries = self.entries();
        for entry in &entries {
            entry.suspend();
        }

        info!(types = entries.len(), "Suspended index sync");
        SyncSuspension { entries }
    }

    fn set_disabled(&self, name: &str, disabled: bool) -> bool {
        match self.get(name) {
            Some(entry) => {
                entry.set_disabled(disabled);
                debug!(entity_type = %name, sync_disabled = disabled, "Toggled index sync");
                true
            }
            None => {
                debug!(entity_type = %name, "Ignoring sync toggle for unregistered entity type");
                false
            }
        }
    }
}

/// Guard returned by [`TypeRegistry::suspend_all`].
#[must_use = "sync resumes as soon as the suspension is dropped"]
#[derive(Debug)]
pub struct SyncSuspension {
    entries: Vec<Arc<RegisteredType>>,
}

impl SyncSuspension {
    /// Release this suspension now.
    pub fn resume(self) {
        drop(self);
    }
}

impl Drop for SyncSuspension {
    fn drop(&mut self) {
        for entry in &self.entries {
            entry.release();
        }
        info!(types = self.entries.len(), "Resumed index sync");
    }
}
