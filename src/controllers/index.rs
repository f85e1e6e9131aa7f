//! Index page: the contact list, live filter and delete action.

use crate::contact::ContactId;
use crate::error::ContactError;
use crate::page::{ids, ContactRow, Page};
use crate::store::ContactStore;

use super::CONFIRM_DELETE;

/// Controller bound to the index page.
#[derive(Debug)]
pub struct IndexController<'s> {
    store: &'s ContactStore,
    filter: String,
}

impl<'s> IndexController<'s> {
    /// Renders the full list and starts with an empty filter.
    pub fn init(store: &'s ContactStore, page: &mut dyn Page) -> Self {
        let controller = Self {
            store,
            filter: String::new(),
        };
        controller.render(page);
        controller
    }

    /// The active filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Re-filters on every keystroke of the search input.
    pub fn on_search_input(&mut self, page: &mut dyn Page, text: &str) {
        text.clone_into(&mut self.filter);
        self.render(page);
    }

    /// Deletes `id` after the user confirms, then re-renders in place.
    ///
    /// Returns whether the user confirmed.
    ///
    /// # Errors
    /// Returns `Storage` if the collection cannot be written.
    pub fn on_delete(&mut self, page: &mut dyn Page, id: ContactId) -> Result<bool, ContactError> {
        if !page.confirm(CONFIRM_DELETE) {
            return Ok(false);
        }
        self.store.remove(id)?;
        self.render(page);
        Ok(true)
    }

    fn render(&self, page: &mut dyn Page) {
        let rows: Vec<ContactRow> = self
            .store
            .filter_by_name(&self.filter)
            .iter()
            .map(ContactRow::from)
            .collect();
        page.render_rows(ids::CONTACT_LIST, &rows);
    }
}
