//! The capability an entity type implements to take part in index synchronization.

use search_sync_repository::Document;
use search_sync_shared::EntityType;
use serde::Serialize;
use serde_json::Value;

use crate::destroyed::DestroyedTracker;
use crate::errors::ProjectionError;

/// An entity whose index document is kept in sync with the primary store.
///
/// Implementors expose an identity and a projection. The lifecycle hooks of the
/// primary store call the `SyncDispatcher`; the entity itself never calls
/// indexing code.
///
/// # Example
///
/// ```
/// use search_sync::{serialize_document, DestroyedTracker, ProjectionError, Synchronizable};
/// use search_sync_repository::Document;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Article {
///     id: u64,
///     title: String,
///     #[serde(skip)]
///     destroyed: DestroyedTracker,
/// }
///
/// impl Synchronizable for Article {
///     const TYPE_NAME: &'static str = "Article";
///
///     fn identity(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn to_document(&self) -> Result<Document, ProjectionError> {
///         serialize_document(self)
///     }
///
///     fn destroyed_tracker(&self) -> Option<&DestroyedTracker> {
///         Some(&self.destroyed)
///     }
/// }
///
/// assert_eq!(Article::entity_type().index, "articles");
/// ```
pub trait Synchronizable: Send + Sync {
    /// Registered type name; must match the `EntityType` the type is registered under.
    const TYPE_NAME: &'static str;

    /// Identity of the instance, used as the index document id.
    fn identity(&self) -> String;

    /// Project the instance into its indexable document.
    ///
    /// Must be free of side effects and deterministic for unchanged state.
    fn to_document(&self) -> Result<Document, ProjectionError>;

    /// The fallback tracker, for types registered with `DestroyedStateSource::Tracked`.
    fn destroyed_tracker(&self) -> Option<&DestroyedTracker> {
        None
    }

    /// The primary store's own destroyed flag, for types registered with
    /// `DestroyedStateSource::Native`.
    fn natively_destroyed(&self) -> Option<bool> {
        None
    }

    /// Default registration descriptor for the type.
    fn entity_type() -> EntityType
    where
        Self: Sized,
    {
        EntityType::new(Self::TYPE_NAME)
    }
}

/// Project any serializable value into a document.
///
/// Fails with `ProjectionError::NotAnObject` when the value does not serialize to
/// a JSON object (e.g. a bare string or sequence).
pub fn serialize_document<T: Serialize + ?Sized>(value: &T) -> Result<Document, ProjectionError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(ProjectionError::NotAnObject),
        Err(e) => Err(ProjectionError::serialization(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Article {
        id: u64,
        title: String,
        #[serde(skip)]
        destroyed: DestroyedTracker,
    }

    #[test]
    fn test_serialize_document_object() {
        let article = Article {
            id: 42,
            title: "Hello".to_string(),
            destroyed: DestroyedTracker::new(),
        };

        let document = serialize_document(&article).unwrap();

        assert_eq!(document.get("id"), Some(&json!(42)));
        assert_eq!(document.get("title"), Some(&json!("Hello")));
        assert!(!document.contains_key("destroyed"));
    }

    #[test]
    fn test_serialize_document_rejects_non_object() {
        assert_eq!(
            serialize_document("just a string"),
            Err(ProjectionError::NotAnObject)
        );
        assert_eq!(
            serialize_document(&vec![1, 2, 3]),
            Err(ProjectionError::NotAnObject)
        );
    }

    #[test]
    fn test_serialize_document_reports_serialization_failure() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");

        assert!(matches!(
            serialize_document(&map),
            Err(ProjectionError::Serialization(_))
        ));
    }
}
