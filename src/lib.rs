//! # contactes - a local contact-list manager
//!
//! contactes keeps a list of contacts as one JSON collection in a key-value
//! store, shows it in a filterable list and edits it through page forms.
//!
//! ## Core Concepts
//!
//! - **Contact**: the only record type (`id`, `nom`, `email`, `telefon`)
//! - **Collection**: all contacts, persisted as one unit under `contactes_db`
//! - **ContactStore**: list, find, add, update, remove and filter
//! - **Page**: the element/field/navigation contract a controller drives
//! - **Router**: picks the Index, Add or Detail controller for a page load
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contactes::{App, AppConfig, MemoryPage, PageEvent};
//!
//! # async fn run() -> contactes::ContactesResult<()> {
//! let app = App::open(AppConfig::default())?;
//!
//! let mut page = MemoryPage::index();
//! let mut session = app.load_page(&mut page).await;
//! session.dispatch(&mut page, PageEvent::SearchInput("ana".into()))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod contact;
pub mod controllers;
pub mod error;
pub mod page;
pub mod router;
pub mod seed;
pub mod storage;
pub mod store;

// Re-export primary types at crate root for convenience
pub use app::{App, Session};
pub use config::{AppConfig, INDEX_PATH};
pub use contact::{Collection, Contact, ContactDraft, ContactId};
pub use controllers::{Controller, PageEvent};
pub use error::{ConfigError, ContactError, ContactesError, ContactesResult, SeedError};
pub use page::{ContactRow, MemoryPage, Page};
pub use router::{route, View};
pub use seed::{SeedLoader, SeedOutcome, SeedSource};
pub use storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageAdapter, StorageError,
    STORAGE_KEY,
};
pub use store::ContactStore;
