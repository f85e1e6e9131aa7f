//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::seed::SeedSource;
use crate::storage::{validate_key, StorageConfig, STORAGE_KEY};

/// Page the controllers redirect to after a save or an invalid detail load.
pub const INDEX_PATH: &str = "index.html";

/// Default seed document name.
pub const DEFAULT_SEED: &str = "contacts.json";

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "./contactes.data";

/// Configuration for a contactes session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the file storage.
    pub data_dir: PathBuf,
    /// Key the collection is stored under.
    pub storage_key: String,
    /// Where seed data comes from on first run (`None` disables seeding).
    pub seed: Option<SeedSource>,
    /// Optional timeout for a seed fetch.
    pub seed_timeout: Option<Duration>,
    /// Path navigated to after add, update and invalid detail loads.
    pub index_path: String,
    /// File backend options.
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: STORAGE_KEY.to_string(),
            seed: Some(SeedSource::parse(DEFAULT_SEED)),
            seed_timeout: None,
            index_path: INDEX_PATH.to_string(),
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Checks the configuration, returning it unchanged when valid.
    ///
    /// # Errors
    /// - `InvalidStorageKey` if the key cannot be used by the backends
    /// - `EmptySeedSource` if a seed source is set but empty
    /// - `EmptyField` if the index path or data directory is empty
    pub fn validate(self) -> Result<Self, ConfigError> {
        if let Err(e) = validate_key(&self.storage_key) {
            return Err(ConfigError::InvalidStorageKey {
                key: self.storage_key.clone(),
                reason: e.to_string(),
            });
        }

        if self.seed.as_ref().is_some_and(SeedSource::is_empty) {
            return Err(ConfigError::EmptySeedSource);
        }

        if self.index_path.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "index_path".to_string(),
            });
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "data_dir".to_string(),
            });
        }

        Ok(self)
    }
}
