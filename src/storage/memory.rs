//! In-memory storage backend.
//!
//! Thread-safe in-memory implementation of [`KeyValueStore`]. It is intended
//! for embedded usage, tests, and as a reference implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::traits::{validate_key, KeyValueStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one item.
    ///
    /// # Errors
    /// Returns `InvalidKey` if `key` is not a valid storage key.
    pub fn with_item(key: &str, value: impl Into<String>) -> Result<Self, StorageError> {
        let store = Self::new();
        store.set_item(key, &value.into())?;
        Ok(store)
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self.items.read().map_err(|_| lock_err("items.read"))?;
        Ok(guard.len())
    }

    /// Returns true when no key is stored.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let guard = self.items.read().map_err(|_| lock_err("items.read"))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut guard = self.items.write().map_err(|_| lock_err("items.write"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut guard = self.items.write().map_err(|_| lock_err("items.write"))?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len().unwrap(), 1);

        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = InMemoryKeyValueStore::new();
        store.remove_item("missing").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let store = InMemoryKeyValueStore::new();
        let err = store.set_item("../x", "v").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }

    #[test]
    fn test_with_item() {
        let store = InMemoryKeyValueStore::with_item("contactes_db", "[]").unwrap();
        assert_eq!(store.get_item("contactes_db").unwrap().as_deref(), Some("[]"));
    }
}
