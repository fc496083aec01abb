use thiserror::Error;

/// Storage-level errors surfaced by [`CatalogStore`](super::CatalogStore)
/// implementations
///
/// `DuplicateKey` is a distinct variant (not a shared sentinel value) so
/// callers can render a specific "already exists" response while concurrent
/// workers each see their own error instance.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    /// Whether this error is the duplicate-key condition
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StorageError::DuplicateKey(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            StorageError::DuplicateKey("product 42".to_string()).to_string(),
            "duplicate key: product 42"
        );
        assert_eq!(
            StorageError::NotFound("shopping list 7".to_string()).to_string(),
            "not found: shopping list 7"
        );
        assert_eq!(
            StorageError::Backend("connection reset".to_string()).to_string(),
            "storage backend failure: connection reset"
        );
    }

    #[test]
    fn duplicate_key_is_identifiable() {
        assert!(StorageError::DuplicateKey("x".to_string()).is_duplicate_key());
        assert!(!StorageError::NotFound("x".to_string()).is_duplicate_key());
    }
}
