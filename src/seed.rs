//! First-run seed loading.
//!
//! When the storage key has never been written, a static JSON document with
//! the persisted collection shape is fetched once and stored as-is. Any
//! failure is logged and leaves storage empty; nothing is retried.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::contact::Collection;
use crate::error::SeedError;
use crate::storage::StorageAdapter;

/// Where seed data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// A local JSON file.
    File(PathBuf),
    /// An `http://` or `https://` URL fetched with a GET request.
    Url(String),
}

impl SeedSource {
    /// Interprets `raw` as a URL when it has an http(s) scheme, else as a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// True when the source names nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::File(path) => path.as_os_str().is_empty(),
            Self::Url(url) => url.is_empty(),
        }
    }
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Result of a bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No seed source configured.
    Disabled,
    /// A collection was already stored; nothing was fetched.
    AlreadyInitialized,
    /// The seed was stored; carries the number of contacts.
    Seeded(usize),
    /// Fetching or decoding failed; storage was left untouched.
    Failed(String),
}

/// Fetches seed data and writes it on first run.
#[derive(Debug, Clone)]
pub struct SeedLoader {
    source: SeedSource,
    timeout: Option<Duration>,
}

impl SeedLoader {
    /// Loader for `source` with no timeout.
    #[must_use]
    pub fn new(source: SeedSource) -> Self {
        Self {
            source,
            timeout: None,
        }
    }

    /// Sets a timeout for HTTP fetches.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured source.
    #[must_use]
    pub fn source(&self) -> &SeedSource {
        &self.source
    }

    /// Seeds `adapter` unless it already holds a collection.
    pub async fn run(&self, adapter: &StorageAdapter) -> SeedOutcome {
        match adapter.is_initialized() {
            Ok(true) => return SeedOutcome::AlreadyInitialized,
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "cannot check stored contacts; skipping seed");
                return SeedOutcome::Failed(e.to_string());
            }
        }

        let result = match self.fetch().await {
            Ok(contacts) => adapter
                .save(&contacts)
                .map(|()| contacts.len())
                .map_err(SeedError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(count) => {
                tracing::info!(source = %self.source, count, "seeded contacts");
                SeedOutcome::Seeded(count)
            }
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "seed load failed");
                SeedOutcome::Failed(e.to_string())
            }
        }
    }

    /// Reads and decodes the seed document.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `Http` / `Status` if the request fails or is not a success
    /// - `Parse` if the body is not a contact list with unique ids
    pub async fn fetch(&self) -> Result<Collection, SeedError> {
        let body = match &self.source {
            SeedSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SeedError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            SeedSource::Url(url) => self.fetch_url(url).await?,
        };
        parse_seed(&body)
    }

    async fn fetch_url(&self, url: &str) -> Result<String, SeedError> {
        let http_err = |e: reqwest::Error| SeedError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(http_err)?;

        let response = client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_err)
    }
}

/// Decodes a seed document, rejecting duplicate ids.
///
/// # Errors
/// Returns `Parse` if `body` is not a contact list or repeats an id.
pub fn parse_seed(body: &str) -> Result<Collection, SeedError> {
    let contacts: Collection = serde_json::from_str(body).map_err(|e| SeedError::Parse {
        message: e.to_string(),
    })?;

    let mut seen = HashSet::with_capacity(contacts.len());
    for contact in &contacts {
        if !seen.insert(contact.id) {
            return Err(SeedError::Parse {
                message: format!("duplicate contact id {}", contact.id),
            });
        }
    }
    Ok(contacts)
}
