//! Session wiring: bootstrap, route, dispatch.
//!
//! An [`App`] owns the contact store for the whole session. Each page load
//! awaits seeding first, then routes once and activates a single
//! controller; events for that load go through the returned [`Session`].

use std::sync::Arc;

use crate::config::AppConfig;
use crate::controllers::{AddController, Controller, DetailController, IndexController, PageEvent};
use crate::error::{ContactError, ContactesResult};
use crate::page::Page;
use crate::router::{route, View};
use crate::seed::{SeedLoader, SeedOutcome};
use crate::storage::{open_storage, InMemoryKeyValueStore, KeyValueStore, StorageAdapter};
use crate::store::ContactStore;

/// A contactes session.
#[derive(Debug)]
pub struct App {
    store: ContactStore,
    seed: Option<SeedLoader>,
    index_path: String,
}

impl App {
    /// Builds a session over an existing key-value backend.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid.
    pub fn new(kv: Arc<dyn KeyValueStore>, config: AppConfig) -> ContactesResult<Self> {
        let config = config.validate()?;
        let adapter = StorageAdapter::with_key(kv, config.storage_key)?;
        let seed = config
            .seed
            .map(|source| SeedLoader::new(source).with_timeout(config.seed_timeout));

        Ok(Self {
            store: ContactStore::new(adapter),
            seed,
            index_path: config.index_path,
        })
    }

    /// Opens file storage in `config.data_dir` and builds a session over it.
    ///
    /// # Errors
    /// - Configuration errors
    /// - `Locked` / `Io` storage errors from opening the data directory
    pub fn open(config: AppConfig) -> ContactesResult<Self> {
        let config = config.validate()?;
        let kv = open_storage(&config.data_dir, Some(config.storage.clone()))?;
        tracing::info!(data_dir = %config.data_dir.display(), "storage opened");
        Self::new(Arc::new(kv), config)
    }

    /// Builds a session over fresh in-memory storage.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid.
    pub fn in_memory(config: AppConfig) -> ContactesResult<Self> {
        Self::new(Arc::new(InMemoryKeyValueStore::new()), config)
    }

    /// The session's contact store.
    #[must_use]
    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Seeds storage on first run. Never fails the page load.
    pub async fn bootstrap(&self) -> SeedOutcome {
        match &self.seed {
            Some(loader) => loader.run(self.store.adapter()).await,
            None => SeedOutcome::Disabled,
        }
    }

    /// Handles a page load: awaits seeding, then routes and activates a
    /// controller.
    pub async fn load_page<'a>(&'a self, page: &mut dyn Page) -> Session<'a> {
        let outcome = self.bootstrap().await;
        tracing::debug!(?outcome, "bootstrap finished");
        self.mount(page)
    }

    /// Routes `page` and activates its controller, without seeding.
    pub fn mount<'a>(&'a self, page: &mut dyn Page) -> Session<'a> {
        let view = route(page);
        let controller = match view {
            Some(View::Index) => Controller::Index(IndexController::init(&self.store, page)),
            Some(View::Add) => Controller::Add(AddController::init(&self.store, &self.index_path)),
            Some(View::Detail) => DetailController::init(&self.store, &self.index_path, page)
                .map_or(Controller::Inert, Controller::Detail),
            None => Controller::Inert,
        };

        match view {
            Some(view) => tracing::debug!(%view, "page routed"),
            None => tracing::debug!("no page anchor found; page is inert"),
        }
        Session { view, controller }
    }
}

/// One page load: the routed view and its active controller.
#[derive(Debug)]
pub struct Session<'a> {
    view: Option<View>,
    controller: Controller<'a>,
}

impl Session<'_> {
    /// The view chosen by the router, `None` for an inert page.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        self.view
    }

    /// The active controller.
    #[must_use]
    pub fn controller(&self) -> &Controller<'_> {
        &self.controller
    }

    /// Delivers `event` to the active controller.
    ///
    /// Events the active view does not handle are ignored.
    ///
    /// # Errors
    /// Returns `Storage` if a mutation cannot be persisted.
    pub fn dispatch(&mut self, page: &mut dyn Page, event: PageEvent) -> Result<(), ContactError> {
        match (&mut self.controller, event) {
            (Controller::Index(index), PageEvent::SearchInput(text)) => {
                index.on_search_input(page, &text);
            }
            (Controller::Index(index), PageEvent::Delete(id)) => {
                index.on_delete(page, id)?;
            }
            (Controller::Add(add), PageEvent::Submit) => add.on_submit(page)?,
            (Controller::Detail(detail), PageEvent::Submit) => detail.on_submit(page)?,
            (_, event) => {
                tracing::debug!(?event, view = ?self.view, "event ignored by active view");
            }
        }
        Ok(())
    }
}
