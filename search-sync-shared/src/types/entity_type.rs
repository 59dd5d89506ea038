//! Entity type descriptors.
//!
//! An `EntityType` names a kind of domain object that participates in index
//! synchronization, the index its documents are written to, and where its
//! "destroyed" state comes from.

use serde::{Deserialize, Serialize};

/// Where the dispatcher reads an instance's destroyed state from.
///
/// Decided once, when the type is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyedStateSource {
    /// The primary store exposes its own destroyed flag on the instance.
    Native,
    /// The instance carries a fallback tracker that the removal path marks.
    #[default]
    Tracked,
}

/// Descriptor of an entity type registered for index synchronization.
///
/// # Example
///
/// ```
/// use search_sync_shared::{DestroyedStateSource, EntityType};
///
/// let article = EntityType::new("Article");
/// assert_eq!(article.index, "articles");
/// assert_eq!(article.destroyed_state, DestroyedStateSource::Tracked);
///
/// let comment = EntityType::new("Comment")
///     .with_index("discussion")
///     .with_native_destroyed_state();
/// assert_eq!(comment.index, "discussion");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    /// Unique type name. Registry identity.
    pub name: String,
    /// Name of the index the type's documents are written to.
    pub index: String,
    pub destroyed_state: DestroyedStateSource,
}

impl EntityType {
    /// Create a descriptor whose index name is derived from the type name
    /// (`BlogPost` becomes `blog_posts`) and whose destroyed state is tracked.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let index = default_index_name(&name);
        Self {
            name,
            index,
            destroyed_state: DestroyedStateSource::Tracked,
        }
    }

    /// Override the target index name.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Mark the type as exposing a native destroyed flag.
    pub fn with_native_destroyed_state(mut self) -> Self {
        self.destroyed_state = DestroyedStateSource::Native;
        self
    }
}

/// Snake-case and pluralise a type name into an index name.
fn default_index_name(type_name: &str) -> String {
    let mut snake = String::with_capacity(type_name.len() + 4);
    for (i, c) in type_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !snake.ends_with('_') {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            snake.push(c);
        } else if !snake.ends_with('_') {
            snake.push('_');
        }
    }

    if ["s", "x", "ch", "sh"]
        .iter()
        .any(|suffix| snake.ends_with(suffix))
    {
        snake.push_str("es");
    } else if snake.ends_with('y')
        && !matches!(
            snake.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u')
        )
    {
        snake.pop();
        snake.push_str("ies");
    } else {
        snake.push('s');
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_name() {
        assert_eq!(EntityType::new("Article").index, "articles");
        assert_eq!(EntityType::new("BlogPost").index, "blog_posts");
        assert_eq!(EntityType::new("Address").index, "addresses");
        assert_eq!(EntityType::new("Category").index, "categories");
        assert_eq!(EntityType::new("Survey").index, "surveys");
        assert_eq!(EntityType::new("Box").index, "boxes");
    }

    #[test]
    fn test_namespaced_type_name() {
        assert_eq!(EntityType::new("Blog::Post").index, "blog_posts");
    }

    #[test]
    fn test_builders() {
        let entity_type = EntityType::new("Article")
            .with_index("news")
            .with_native_destroyed_state();

        assert_eq!(entity_type.name, "Article");
        assert_eq!(entity_type.index, "news");
        assert_eq!(entity_type.destroyed_state, DestroyedStateSource::Native);
    }

    #[test]
    fn test_serialization() {
        let entity_type = EntityType::new("Comment");
        let json = serde_json::to_value(&entity_type).unwrap();

        assert_eq!(json["name"], "Comment");
        assert_eq!(json["index"], "comments");
        assert_eq!(json["destroyed_state"], "tracked");
    }
}
