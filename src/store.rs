//! Typed contact operations over the persisted collection.
//!
//! Every mutation loads the whole collection, changes it in memory and
//! writes it back in one `save`. Lookups are linear scans by id.

use std::sync::Mutex;

use crate::contact::{Collection, Contact, ContactDraft, ContactId};
use crate::error::ContactError;
use crate::storage::{StorageAdapter, StorageError};

/// The contact store, constructed once per session and shared with the
/// page controllers.
#[derive(Debug)]
pub struct ContactStore {
    adapter: StorageAdapter,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl ContactStore {
    /// Creates a store persisting through `adapter`.
    #[must_use]
    pub fn new(adapter: StorageAdapter) -> Self {
        Self {
            adapter,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying storage adapter.
    #[must_use]
    pub fn adapter(&self) -> &StorageAdapter {
        &self.adapter
    }

    /// All contacts, in insertion order.
    #[must_use]
    pub fn list(&self) -> Collection {
        self.adapter.load()
    }

    /// Contacts whose name contains `query`, ignoring case.
    ///
    /// An empty query returns the whole collection.
    #[must_use]
    pub fn filter_by_name(&self, query: &str) -> Collection {
        let needle = query.to_lowercase();
        self.list()
            .into_iter()
            .filter(|c| c.name_contains_lowercase(&needle))
            .collect()
    }

    /// Finds a contact by id.
    #[must_use]
    pub fn find_by_id(&self, id: ContactId) -> Option<Contact> {
        self.list().into_iter().find(|c| c.id == id)
    }

    /// Appends a new contact with id `max + 1` (or 1) and persists.
    ///
    /// # Errors
    /// - `IdSpaceExhausted` if the largest stored id is `u64::MAX`; nothing is written
    /// - `Storage` if the collection cannot be read or written
    pub fn add(&self, draft: ContactDraft) -> Result<Contact, ContactError> {
        let _guard = self.lock()?;
        let mut contacts = self.adapter.load_for_update()?;
        let id = next_id(&contacts)?;
        let contact = Contact::from_draft(id, draft);
        contacts.push(contact.clone());
        self.adapter.save(&contacts)?;

        tracing::info!(id = %id, "contact added");
        Ok(contact)
    }

    /// Overwrites the mutable fields of contact `id` and persists.
    ///
    /// # Errors
    /// - `NotFound` if no contact has this id; nothing is written
    /// - `Storage` if the collection cannot be read or written
    pub fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, ContactError> {
        let _guard = self.lock()?;
        let mut contacts = self.adapter.load_for_update()?;
        let Some(contact) = contacts.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(id = %id, "update skipped: contact not found");
            return Err(ContactError::NotFound { id });
        };
        contact.apply(draft);
        let updated = contact.clone();
        self.adapter.save(&contacts)?;

        tracing::info!(id = %id, "contact updated");
        Ok(updated)
    }

    /// Removes contact `id` and persists.
    ///
    /// Returns the removed contact, or `None` if the id was absent. An absent
    /// id is not an error; the collection is still written back unchanged.
    ///
    /// # Errors
    /// Returns `Storage` if the collection cannot be read or written.
    pub fn remove(&self, id: ContactId) -> Result<Option<Contact>, ContactError> {
        let _guard = self.lock()?;
        let mut contacts = self.adapter.load_for_update()?;
        let position = contacts.iter().position(|c| c.id == id);
        let removed = position.map(|idx| contacts.remove(idx));
        self.adapter.save(&contacts)?;

        if removed.is_some() {
            tracing::info!(id = %id, "contact removed");
        }
        Ok(removed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::BackendError("poisoned lock: contact store".to_string()))
    }
}

/// `1 + max(existing ids)`, or [`ContactId::FIRST`] for an empty collection.
///
/// # Errors
/// Returns `IdSpaceExhausted` if the largest id is `u64::MAX`.
pub fn next_id(contacts: &[Contact]) -> Result<ContactId, ContactError> {
    match contacts.iter().map(|c| c.id).max() {
        None => Ok(ContactId::FIRST),
        Some(last) => last.next().ok_or(ContactError::IdSpaceExhausted { last }),
    }
}
