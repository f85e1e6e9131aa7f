//! Storage adapter: the contact collection under one fixed key.
//!
//! `load` fails open. A missing key, a backend read error or an
//! unparseable blob all read as an empty collection; the cause is logged
//! and never surfaced to the caller. Mutations go through
//! `load_for_update`, which reads content the same way but returns backend
//! read errors, so a failed read is never written back as an empty list.

use std::sync::Arc;

use crate::contact::Collection;
use crate::storage::traits::{validate_key, KeyValueStore, StorageError};

/// Default key the collection is stored under.
pub const STORAGE_KEY: &str = "contactes_db";

/// Reads and writes the serialized collection.
#[derive(Clone)]
pub struct StorageAdapter {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAdapter").field("key", &self.key).finish_non_exhaustive()
    }
}

impl StorageAdapter {
    /// Adapter over `kv` using [`STORAGE_KEY`].
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Adapter over `kv` using a custom key.
    ///
    /// # Errors
    /// Returns `InvalidKey` if `key` is not a valid storage key.
    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self { kv, key })
    }

    /// The key the collection lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored collection, or an empty one if nothing usable is stored.
    #[must_use]
    pub fn load(&self) -> Collection {
        self.load_for_update().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "failed to read contacts; using empty list");
            Collection::new()
        })
    }

    /// Load the collection ahead of a read-modify-write cycle.
    ///
    /// Absent, `null` or unparseable content still reads as empty.
    ///
    /// # Errors
    /// Returns the backend error if the read itself fails.
    pub fn load_for_update(&self) -> Result<Collection, StorageError> {
        let Some(raw) = self.kv.get_item(&self.key)? else {
            return Ok(Collection::new());
        };

        match serde_json::from_str::<Option<Collection>>(&raw) {
            Ok(contacts) => Ok(contacts.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored contacts are unreadable; using empty list");
                Ok(Collection::new())
            }
        }
    }

    /// Replace the stored collection.
    ///
    /// # Errors
    /// Returns the backend error if the write fails.
    pub fn save(&self, contacts: &Collection) -> Result<(), StorageError> {
        let raw = serde_json::to_string(contacts)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.kv.set_item(&self.key, &raw)
    }

    /// True when the key holds non-empty content.
    ///
    /// # Errors
    /// Returns the backend error if the read fails.
    pub fn is_initialized(&self) -> Result<bool, StorageError> {
        Ok(self
            .kv
            .get_item(&self.key)?
            .is_some_and(|raw| !raw.is_empty()))
    }

    /// Drop the stored collection entirely.
    ///
    /// # Errors
    /// Returns the backend error if the removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.kv.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{Contact, ContactDraft, ContactId};
    use crate::storage::InMemoryKeyValueStore;

    fn adapter_with(raw: Option<&str>) -> (StorageAdapter, Arc<InMemoryKeyValueStore>) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        if let Some(raw) = raw {
            kv.set_item(STORAGE_KEY, raw).unwrap();
        }
        (StorageAdapter::new(kv.clone()), kv)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let (adapter, _) = adapter_with(None);
        assert!(adapter.load().is_empty());
        assert!(!adapter.is_initialized().unwrap());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let (adapter, _) = adapter_with(Some("{not json"));
        assert!(adapter.load().is_empty());
        // Corrupt data is still "present" for the seed gate.
        assert!(adapter.is_initialized().unwrap());
    }

    #[test]
    fn test_load_null_is_empty() {
        let (adapter, _) = adapter_with(Some("null"));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let (adapter, _) = adapter_with(Some(r#"{"id":1}"#));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_empty_string_is_not_initialized() {
        let (adapter, _) = adapter_with(Some(""));
        assert!(!adapter.is_initialized().unwrap());
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let (adapter, kv) = adapter_with(Some("[]"));
        let first = vec![Contact::from_draft(ContactId::new(1), ContactDraft::new("Ana", "a", "1"))];
        adapter.save(&first).unwrap();
        let second = vec![Contact::from_draft(ContactId::new(2), ContactDraft::new("Ben", "b", "2"))];
        adapter.save(&second).unwrap();

        assert_eq!(adapter.load(), second);
        let raw = kv.get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"nom\":\"Ben\""));
        assert!(!raw.contains("Ana"));
    }

    #[test]
    fn test_custom_key() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let adapter = StorageAdapter::with_key(kv.clone(), "other_db").unwrap();
        adapter.save(&Collection::new()).unwrap();
        assert_eq!(kv.get_item("other_db").unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.get_item(STORAGE_KEY).unwrap(), None);

        assert!(StorageAdapter::with_key(kv, "bad/key").is_err());
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("EIO")))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_for_update_propagates_read_errors() {
        let adapter = StorageAdapter::new(Arc::new(UnreadableStore));
        assert!(matches!(adapter.load_for_update(), Err(StorageError::Io(_))));
        // Display reads still fail open.
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_load_for_update_maps_content_like_load() {
        for raw in [None, Some("null"), Some("{not json"), Some("")] {
            let (adapter, _) = adapter_with(raw);
            assert!(adapter.load_for_update().unwrap().is_empty(), "content {raw:?}");
        }
        let (adapter, _) = adapter_with(Some(r#"[{"id":4,"nom":"Ana","email":"","telefon":""}]"#));
        assert_eq!(adapter.load_for_update().unwrap()[0].id, ContactId::new(4));
    }

    #[test]
    fn test_clear() {
        let (adapter, _) = adapter_with(Some("[]"));
        adapter.clear().unwrap();
        assert!(!adapter.is_initialized().unwrap());
    }
}
