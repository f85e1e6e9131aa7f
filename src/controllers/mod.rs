//! Page controllers.
//!
//! Each controller binds one page's events to contact store operations.
//! Events arrive as explicit [`PageEvent`] values; there are no global
//! handlers.

mod add;
mod detail;
mod index;

pub use add::AddController;
pub use detail::DetailController;
pub use index::IndexController;

use crate::contact::{ContactDraft, ContactId};
use crate::page::Page;

/// Question asked before deleting a contact.
pub const CONFIRM_DELETE: &str = "Segur que vols esborrar aquest contacte?";

/// Alert shown when the detail page names an unknown contact.
pub const CONTACT_NOT_FOUND: &str = "No s'ha trobat el contacte";

/// A user interaction on the loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The search input changed to this text.
    SearchInput(String),
    /// The delete button of a row was pressed.
    Delete(ContactId),
    /// The page's form was submitted.
    Submit,
}

/// The controller a page load activated.
#[derive(Debug)]
pub enum Controller<'s> {
    /// Index page.
    Index(IndexController<'s>),
    /// Add page.
    Add(AddController<'s>),
    /// Detail page with a valid contact.
    Detail(DetailController<'s>),
    /// No controller: inert page, or a detail page that redirected.
    Inert,
}

// Missing fields read as empty strings.
fn read_draft(page: &dyn Page, name: &str, email: &str, phone: &str) -> ContactDraft {
    let value = |id: &str| page.field_value(id).unwrap_or_default();
    ContactDraft {
        name: value(name),
        email: value(email),
        phone: value(phone),
    }
}
