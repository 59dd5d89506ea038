//! Registry of entity types that participate in index synchronization.
//!
//! Types are registered once during bootstrap and never removed. Each entry
//! owns the type's sync switch state (see the `switch` module for the
//! enable/disable operations).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use search_sync_shared::EntityType;
use tracing::{debug, info};

/// A registered entity type together with its sync switch state.
///
/// The explicit `disabled` flag and the suspension depth are independent: a
/// type is active only when it is not disabled and no suspension is held.
#[derive(Debug)]
pub struct RegisteredType {
    descriptor: EntityType,
    disabled: AtomicBool,
    suspensions: AtomicUsize,
}

impl RegisteredType {
    fn new(descriptor: EntityType, disabled: bool) -> Self {
        Self {
            descriptor,
            disabled: AtomicBool::new(disabled),
            suspensions: AtomicUsize::new(0),
        }
    }

    pub fn descriptor(&self) -> &EntityType {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Whether sync was explicitly disabled for the type.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// Whether at least one `SyncSuspension` covering the type is alive.
    pub fn is_suspended(&self) -> bool {
        self.suspensions.load(Ordering::Acquire) > 0
    }

    /// Whether lifecycle notifications for the type reach the index.
    pub fn is_active(&self) -> bool {
        !self.is_disabled() && !self.is_suspended()
    }

    pub(crate) fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Release);
    }

    pub(crate) fn suspend(&self) {
        self.suspensions.fetch_add(1, Ordering::AcqRel);
    }

    /// Release one suspension. Every call is paired with an earlier `suspend`.
    pub(crate) fn release(&self) {
        let _ = self
            .suspensions
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |depth| {
                depth.checked_sub(1)
            });
    }
}

/// Ordered, duplicate-free set of registered entity types.
///
/// The registry is an ordinary value: compose one per process (usually behind an
/// `Arc`) and hand it to the dispatcher, or build independent ones per test.
///
/// # Example
///
/// ```
/// use search_sync::TypeRegistry;
/// use search_sync_shared::EntityType;
///
/// let registry = TypeRegistry::new();
/// assert!(registry.register(EntityType::new("Article")));
/// assert!(!registry.register(EntityType::new("Article")));
/// assert_eq!(registry.len(), 1);
/// assert!(registry.is_active_for("Article"));
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<Vec<Arc<RegisteredType>>>,
    start_disabled: bool,
}

impl TypeRegistry {
    /// Create an empty registry; newly registered types start enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose newly registered types start disabled.
    pub fn with_sync_disabled() -> Self {
        Self {
            types: RwLock::default(),
            start_disabled: true,
        }
    }

    /// Register an entity type.
    ///
    /// Idempotent: registering a name that is already present keeps the original
    /// descriptor and switch state. Returns `true` when the type was newly added.
    pub fn register(&self, entity_type: EntityType) -> bool {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);

        if types.iter().any(|t| t.name() == entity_type.name) {
            debug!(entity_type = %entity_type.name, "Entity type already registered");
            return false;
        }

        info!(
            entity_type = %entity_type.name,
            index = %entity_type.index,
            destroyed_state = ?entity_type.destroyed_state,
            sync_disabled = self.start_disabled,
            "Registered entity type"
        );
        types.push(Arc::new(RegisteredType::new(
            entity_type,
            self.start_disabled,
        )));
        true
    }

    /// Look up a registered type by name.
    pub fn get(&self, name: &str) -> Option<Arc<RegisteredType>> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.iter().find(|t| t.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Descriptors of all registered types, in registration order.
    pub fn all(&self) -> Vec<EntityType> {
        self.entries()
            .iter()
            .map(|t| t.descriptor().clone())
            .collect()
    }

    /// Snapshot of the registry entries, in registration order.
    pub(crate) fn entries(&self) -> Vec<Arc<RegisteredType>> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &TypeRegistry) -> Vec<String> {
        registry.all().into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_register_preserves_order() {
        let registry = TypeRegistry::new();

        registry.register(EntityType::new("Article"));
        registry.register(EntityType::new("Comment"));
        registry.register(EntityType::new("Author"));

        assert_eq!(names(&registry), vec!["Article", "Comment", "Author"]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = TypeRegistry::new();

        assert!(registry.register(EntityType::new("Article")));
        assert!(registry.register(EntityType::new("Comment")));
        assert!(!registry.register(EntityType::new("Article").with_index("other")));

        assert_eq!(registry.len(), 2);
        assert_eq!(names(&registry), vec!["Article", "Comment"]);
        // First descriptor wins.
        assert_eq!(registry.get("Article").unwrap().descriptor().index, "articles");
    }

    #[test]
    fn test_get_unknown_type() {
        let registry = TypeRegistry::new();
        assert!(registry.get("Article").is_none());
        assert!(!registry.contains("Article"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_new_types_start_enabled() {
        let registry = TypeRegistry::new();
        registry.register(EntityType::new("Article"));

        let entry = registry.get("Article").unwrap();
        assert!(!entry.is_disabled());
        assert!(!entry.is_suspended());
        assert!(entry.is_active());
    }

    #[test]
    fn test_with_sync_disabled() {
        let registry = TypeRegistry::with_sync_disabled();
        registry.register(EntityType::new("Article"));

        let entry = registry.get("Article").unwrap();
        assert!(entry.is_disabled());
        assert!(!entry.is_active());
    }

    #[test]
    fn test_independent_registries() {
        let first = TypeRegistry::new();
        let second = TypeRegistry::new();

        first.register(EntityType::new("Article"));

        assert!(first.contains("Article"));
        assert!(!second.contains("Article"));
    }

    #[test]
    fn test_suspension_depth_is_counted() {
        let registry = TypeRegistry::new();
        registry.register(EntityType::new("Article"));
        let entry = registry.get("Article").unwrap();

        entry.suspend();
        entry.suspend();
        entry.release();
        assert!(entry.is_suspended());
        assert!(!entry.is_active());

        entry.release();
        assert!(!entry.is_suspended());
        assert!(entry.is_active());

        // An unpaired release never wraps the depth around.
        entry.release();
        assert!(!entry.is_suspended());
    }
}
