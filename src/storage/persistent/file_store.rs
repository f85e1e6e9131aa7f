//! File-per-key storage backend.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a sibling
//! `.tmp` file which is then renamed over the target, so a reader sees
//! either the old value or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::storage::traits::{validate_key, KeyValueStore, StorageError};

use super::dir_lock::DataDirLock;
use super::StorageConfig;

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Key-value store backed by a locked data directory.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    sync_on_write: bool,
    _lock: DataDirLock,
}

impl FileKeyValueStore {
    /// Open (or create) the data directory at `dir` and lock it.
    ///
    /// # Errors
    /// - `Locked` if another process uses the directory
    /// - `Io` if the directory cannot be created
    pub fn open(dir: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let lock = DataDirLock::acquire(dir)?;
        tracing::debug!(dir = %dir.display(), "opened file storage");

        Ok(Self {
            dir: dir.to_path_buf(),
            sync_on_write: config.sync_on_write,
            _lock: lock,
        })
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{VALUE_EXTENSION}"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{TEMP_EXTENSION}"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.value_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let tmp = self.temp_path(key);
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            if self.sync_on_write {
                file.sync_all()?;
            }
        }
        fs::rename(&tmp, self.value_path(key))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileKeyValueStore::open(dir.path(), &StorageConfig::default()).unwrap();
            store.set_item("contactes_db", "[1]").unwrap();
            store.set_item("contactes_db", "[2]").unwrap();
        }

        let store = FileKeyValueStore::open(dir.path(), &StorageConfig::default()).unwrap();
        assert_eq!(store.get_item("contactes_db").unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("contactes_db.json.tmp").exists());
    }

    #[test]
    fn test_absent_key_and_remove() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path(), &StorageConfig::default()).unwrap();
        assert_eq!(store.get_item("missing").unwrap(), None);
        store.remove_item("missing").unwrap();

        store.set_item("k", "v").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileKeyValueStore::open(&nested, &StorageConfig::default()).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_second_open_is_locked() {
        let dir = tempdir().unwrap();
        let _first = FileKeyValueStore::open(dir.path(), &StorageConfig::default()).unwrap();
        let err = FileKeyValueStore::open(dir.path(), &StorageConfig::default()).unwrap_err();
        assert!(matches!(err, StorageError::Locked(_)));
    }
}
