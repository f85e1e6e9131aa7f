//! Abstract key-value storage for contactes.
//!
//! The contact collection lives under a single key of a string key-value
//! store. By using a trait, we can back it with:
//! - An in-memory map for tests and embedded use
//! - A directory of files for the command line front-end

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is not a valid storage key.
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Another process holds the storage lock.
    #[error("Storage is locked by another process: {0}")]
    Locked(String),

    /// Filesystem failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// A string key-value store with whole-value replace semantics.
///
/// # Consistency
/// - `set_item` replaces the previous value atomically; readers never see a
///   partially written value
/// - Implementations must be safe to share across threads
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Checks that `key` can be used by every backend.
///
/// Keys map to file names in the file backend, so they are restricted to
/// `[A-Za-z0-9_.-]` and may not start with a dot.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = |reason| StorageError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }
    if key.starts_with('.') {
        return Err(invalid("key cannot start with '.'"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid("key may only contain [A-Za-z0-9_.-]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_key_value_store_object_safe(_: &dyn KeyValueStore) {}

    #[test]
    fn test_validate_key() {
        assert!(validate_key("contactes_db").is_ok());
        assert!(validate_key("seed-v1.backup").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key(".lock").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Locked("/data".to_string());
        assert!(err.to_string().contains("locked"));

        let err = validate_key("a/b").unwrap_err();
        assert!(err.to_string().contains("a/b"));
    }
}
