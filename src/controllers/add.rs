//! Add page: the new-contact form.

use crate::error::ContactError;
use crate::page::{ids, Page};
use crate::store::ContactStore;

use super::read_draft;

/// Controller bound to the add page.
#[derive(Debug)]
pub struct AddController<'s> {
    store: &'s ContactStore,
    index_path: &'s str,
}

impl<'s> AddController<'s> {
    /// Binds the form; nothing is rendered.
    #[must_use]
    pub fn init(store: &'s ContactStore, index_path: &'s str) -> Self {
        Self { store, index_path }
    }

    /// Stores the form as a new contact and returns to the index.
    ///
    /// # Errors
    /// Returns `Storage` if the collection cannot be written; the page is
    /// left where it is.
    pub fn on_submit(&self, page: &mut dyn Page) -> Result<(), ContactError> {
        let draft = read_draft(page, ids::ADD_NAME, ids::ADD_EMAIL, ids::ADD_PHONE);
        self.store.add(draft)?;
        page.navigate(self.index_path);
        Ok(())
    }
}
