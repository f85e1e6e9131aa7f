//! Detail page: edit one contact selected by the `id` query parameter.

use crate::contact::ContactId;
use crate::error::ContactError;
use crate::page::{ids, Page};
use crate::store::ContactStore;

use super::{read_draft, CONTACT_NOT_FOUND};

/// Controller bound to the detail page.
#[derive(Debug)]
pub struct DetailController<'s> {
    store: &'s ContactStore,
    index_path: &'s str,
    id: ContactId,
}

impl<'s> DetailController<'s> {
    /// Fills the form from the contact named by the query string.
    ///
    /// Returns `None` after alerting and redirecting to the index when the
    /// id is missing, unparseable, or not in the collection.
    pub fn init(store: &'s ContactStore, index_path: &'s str, page: &mut dyn Page) -> Option<Self> {
        let raw = page.query_param(ids::QUERY_ID);
        let found = raw
            .as_deref()
            .and_then(|raw| raw.parse::<ContactId>().ok())
            .and_then(|id| store.find_by_id(id));

        let Some(contact) = found else {
            tracing::debug!(id = ?raw, "detail page for unknown contact");
            page.alert(CONTACT_NOT_FOUND);
            page.navigate(index_path);
            return None;
        };

        page.set_field_value(ids::EDIT_NAME, &contact.name);
        page.set_field_value(ids::EDIT_EMAIL, &contact.email);
        page.set_field_value(ids::EDIT_PHONE, &contact.phone);
        page.set_field_value(ids::EDIT_ID, &contact.id.to_string());

        Some(Self {
            store,
            index_path,
            id: contact.id,
        })
    }

    /// Id of the contact being edited.
    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Saves the form over the contact and returns to the index.
    ///
    /// If the contact was deleted since the page loaded, the user is
    /// alerted and sent to the index instead.
    ///
    /// # Errors
    /// Returns `Storage` if the collection cannot be written.
    pub fn on_submit(&self, page: &mut dyn Page) -> Result<(), ContactError> {
        let draft = read_draft(page, ids::EDIT_NAME, ids::EDIT_EMAIL, ids::EDIT_PHONE);
        match self.store.update(self.id, draft) {
            Ok(_) => {}
            Err(ContactError::NotFound { .. }) => page.alert(CONTACT_NOT_FOUND),
            Err(e) => return Err(e),
        }
        page.navigate(self.index_path);
        Ok(())
    }
}
