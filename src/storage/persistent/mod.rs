//! Persistent storage backend for contactes.
//!
//! This module provides durable storage with:
//! - One file per key inside a data directory
//! - Atomic whole-value replacement (write temp file, then rename)
//! - File locking for single-process access
//!
//! # Layout
//!
//! ```text
//! <data-dir>/
//! ├── .lock               exclusive lock (flock / LockFileEx)
//! └── contactes_db.json   serialized contact collection
//! ```

mod dir_lock;
mod file_store;

pub use dir_lock::{DataDirLock, LOCK_FILE_NAME};
pub use file_store::FileKeyValueStore;

use std::path::Path;

use crate::storage::traits::StorageError;

/// Configuration for persistent storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Whether to fsync after every write (slower but safer).
    pub sync_on_write: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { sync_on_write: true }
    }
}

/// Open or create file storage at the given directory.
///
/// # Errors
/// - If the directory cannot be created or accessed
/// - If another process holds the lock
///
/// # Example
/// ```rust,no_run
/// use contactes::storage::open_storage;
///
/// let kv = open_storage("./contactes.data", None)?;
/// # Ok::<(), contactes::StorageError>(())
/// ```
pub fn open_storage(
    path: impl AsRef<Path>,
    config: Option<StorageConfig>,
) -> Result<FileKeyValueStore, StorageError> {
    let cfg = config.unwrap_or_default();
    FileKeyValueStore::open(path.as_ref(), &cfg)
}
