//! Storage layer for contactes.
//!
//! A [`KeyValueStore`] backend holds raw strings; the [`StorageAdapter`]
//! reads and writes the serialized contact collection on top of it.

mod adapter;
mod memory;
pub mod persistent;
mod traits;

pub use adapter::{StorageAdapter, STORAGE_KEY};
pub use memory::InMemoryKeyValueStore;
pub use persistent::{open_storage, FileKeyValueStore, StorageConfig};
pub use traits::{validate_key, KeyValueStore, StorageError};
