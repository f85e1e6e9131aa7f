//! Error types for contactes.
//!
//! Errors are strongly typed using thiserror so callers can match on the
//! condition that failed. Storage errors live next to the backend trait in
//! [`crate::storage`]; everything else is defined here.

use thiserror::Error;

use crate::contact::ContactId;
use crate::storage::StorageError;

/// Errors returned by contact store operations.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact not found: {id}")]
    NotFound {
        id: ContactId,
    },

    #[error("No contact id left after {last}")]
    IdSpaceExhausted {
        last: ContactId,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised while fetching or decoding seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed request to {url} failed: {message}")]
    Http {
        url: String,
        message: String,
    },

    #[error("Seed request to {url} returned status {status}")]
    Status {
        url: String,
        status: u16,
    },

    #[error("Seed document is not a contact list: {message}")]
    Parse {
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration errors, reported before anything is opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Storage key '{key}' is invalid: {reason}")]
    InvalidStorageKey {
        key: String,
        reason: String,
    },

    #[error("Seed source cannot be empty")]
    EmptySeedSource,

    #[error("Field '{field}' cannot be empty")]
    EmptyField {
        field: String,
    },
}

/// Top-level error type for contactes.
#[derive(Debug, Error)]
pub enum ContactesError {
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ContactesError {
    /// Returns true if this is a missing-contact error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Contact(ContactError::NotFound { .. }))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for contactes operations.
pub type ContactesResult<T> = Result<T, ContactesError>;
