//! Validation helpers shared by the index client and providers.

use crate::errors::SearchIndexError;

/// Characters OpenSearch rejects in index names.
const FORBIDDEN_INDEX_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':',
];

/// Maximum index name length in bytes.
const MAX_INDEX_NAME_BYTES: usize = 255;

/// Maximum document id length in bytes.
const MAX_DOCUMENT_ID_BYTES: usize = 512;

/// Validate an index name against OpenSearch naming rules.
///
/// # Example
///
/// ```
/// use search_sync_repository::validate_index_name;
///
/// assert!(validate_index_name("articles").is_ok());
/// assert!(validate_index_name("Articles").is_err());
/// ```
pub fn validate_index_name(index: &str) -> Result<(), SearchIndexError> {
    if index.is_empty() {
        return Err(SearchIndexError::validation("index name is required"));
    }
    if index == "." || index == ".." {
        return Err(SearchIndexError::validation(format!(
            "index name '{}' is reserved",
            index
        )));
    }
    if index.len() > MAX_INDEX_NAME_BYTES {
        return Err(SearchIndexError::validation(format!(
            "index name exceeds {} bytes",
            MAX_INDEX_NAME_BYTES
        )));
    }
    if index.starts_with(['_', '-', '+']) {
        return Err(SearchIndexError::validation(format!(
            "index name '{}' must not start with '_', '-' or '+'",
            index
        )));
    }
    if index.chars().any(|c| c.is_uppercase()) {
        return Err(SearchIndexError::validation(format!(
            "index name '{}' must be lowercase",
            index
        )));
    }
    if let Some(c) = index.chars().find(|c| FORBIDDEN_INDEX_CHARS.contains(c)) {
        return Err(SearchIndexError::validation(format!(
            "index name '{}' contains invalid character '{}'",
            index, c
        )));
    }
    Ok(())
}

/// Validate a document id (the entity identity).
pub fn validate_document_id(document_id: &str) -> Result<(), SearchIndexError> {
    if document_id.is_empty() {
        return Err(SearchIndexError::validation("document_id is required"));
    }
    if document_id.len() > MAX_DOCUMENT_ID_BYTES {
        return Err(SearchIndexError::validation(format!(
            "document_id exceeds {} bytes",
            MAX_DOCUMENT_ID_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_index_name_valid() {
        for name in ["articles", "blog_posts", "app-articles", "articles_v2", "a.b"] {
            assert!(validate_index_name(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_validate_index_name_invalid() {
        for name in [
            "", ".", "..", "_hidden", "-dash", "+plus", "Articles", "with space", "a/b", "a,b",
            "a#b", "a*b",
        ] {
            let result = validate_index_name(name);
            assert!(
                matches!(result, Err(SearchIndexError::ValidationError(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_index_name_too_long() {
        let name = "a".repeat(MAX_INDEX_NAME_BYTES + 1);
        assert!(validate_index_name(&name).is_err());
    }

    #[test]
    fn test_validate_document_id() {
        assert!(validate_document_id("42").is_ok());
        assert!(matches!(
            validate_document_id(""),
            Err(SearchIndexError::ValidationError(_))
        ));
        assert!(validate_document_id(&"x".repeat(MAX_DOCUMENT_ID_BYTES + 1)).is_err());
    }
}
