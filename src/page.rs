//! The page contract controllers talk to.
//!
//! A [`Page`] stands in for the document of one page load: which anchor
//! elements exist, form field values, the query string, and the
//! user-facing side effects (render, confirm, alert, navigate).
//! [`MemoryPage`] is a recording implementation used by tests and by the
//! command line front-end.

use std::collections::{HashMap, HashSet};

use crate::contact::{Contact, ContactId};

/// Element and field ids of the page contract.
pub mod ids {
    /// Index page: table body the rows are rendered into.
    pub const CONTACT_LIST: &str = "contact-list";
    /// Index page: live filter input.
    pub const SEARCH_INPUT: &str = "search-input";

    /// Add page: form anchor.
    pub const FORM_ADD: &str = "form-afegir";
    /// Add page: name field.
    pub const ADD_NAME: &str = "nom";
    /// Add page: email field.
    pub const ADD_EMAIL: &str = "email";
    /// Add page: phone field.
    pub const ADD_PHONE: &str = "telefon";

    /// Detail page: form anchor.
    pub const FORM_DETAIL: &str = "form-detall";
    /// Detail page: name field.
    pub const EDIT_NAME: &str = "edit-nom";
    /// Detail page: email field.
    pub const EDIT_EMAIL: &str = "edit-email";
    /// Detail page: phone field.
    pub const EDIT_PHONE: &str = "edit-telefon";
    /// Detail page: hidden id field.
    pub const EDIT_ID: &str = "edit-id";

    /// Query parameter carrying the contact id on the detail page.
    pub const QUERY_ID: &str = "id";
}

/// Path of the detail page.
pub const DETAIL_PATH: &str = "detall.html";

/// One rendered row of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    /// Contact id, bound to the row's delete action.
    pub id: ContactId,
    /// Name cell.
    pub name: String,
    /// Email cell.
    pub email: String,
    /// Phone cell.
    pub phone: String,
    /// Link to the detail page for this contact.
    pub edit_href: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            edit_href: format!("{DETAIL_PATH}?{}={}", ids::QUERY_ID, c.id),
        }
    }
}

/// Side-effecting view of one loaded page.
pub trait Page {
    /// True if an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Value of a query string parameter of the current URL.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Current value of a form field, `None` if the field does not exist.
    fn field_value(&self, id: &str) -> Option<String>;

    /// Sets a form field's value.
    fn set_field_value(&mut self, id: &str, value: &str);

    /// Replaces the content of `target` with `rows`.
    fn render_rows(&mut self, target: &str, rows: &[ContactRow]);

    /// Asks the user a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Shows a message to the user.
    fn alert(&mut self, message: &str);

    /// Leaves the page for `path`.
    fn navigate(&mut self, path: &str);
}

/// A page held entirely in memory that records every side effect.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: HashSet<String>,
    fields: HashMap<String, String>,
    query: HashMap<String, String>,
    rendered: HashMap<String, Vec<ContactRow>>,
    confirm_answer: bool,
    confirms: Vec<String>,
    alerts: Vec<String>,
    navigations: Vec<String>,
}

impl MemoryPage {
    /// An empty page with no elements (inert for the router).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The index page: list target and search input.
    #[must_use]
    pub fn index() -> Self {
        Self::new()
            .with_element(ids::CONTACT_LIST)
            .with_field(ids::SEARCH_INPUT, "")
    }

    /// The add page: form and its three empty fields.
    #[must_use]
    pub fn add() -> Self {
        Self::new()
            .with_element(ids::FORM_ADD)
            .with_field(ids::ADD_NAME, "")
            .with_field(ids::ADD_EMAIL, "")
            .with_field(ids::ADD_PHONE, "")
    }

    /// The detail page, with `id` as the raw query parameter if given.
    #[must_use]
    pub fn detail(id: Option<&str>) -> Self {
        let page = Self::new()
            .with_element(ids::FORM_DETAIL)
            .with_field(ids::EDIT_NAME, "")
            .with_field(ids::EDIT_EMAIL, "")
            .with_field(ids::EDIT_PHONE, "")
            .with_field(ids::EDIT_ID, "");
        match id {
            Some(id) => page.with_query(ids::QUERY_ID, id),
            None => page,
        }
    }

    /// Adds an element.
    #[must_use]
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string());
        self
    }

    /// Adds a form field (which is also an element).
    #[must_use]
    pub fn with_field(mut self, id: &str, value: &str) -> Self {
        self.elements.insert(id.to_string());
        self.fields.insert(id.to_string(), value.to_string());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets what every `confirm` call answers.
    #[must_use]
    pub fn answering_confirm(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    /// Rows last rendered into `target`, if any.
    #[must_use]
    pub fn rendered(&self, target: &str) -> Option<&[ContactRow]> {
        self.rendered.get(target).map(Vec::as_slice)
    }

    /// Questions asked through `confirm`.
    #[must_use]
    pub fn confirms(&self) -> &[String] {
        &self.confirms
    }

    /// Messages shown through `alert`.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Paths navigated to.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.query.get(name).cloned()
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(field) = self.fields.get_mut(id) {
            value.clone_into(field);
        }
    }

    fn render_rows(&mut self, target: &str, rows: &[ContactRow]) {
        self.rendered.insert(target.to_string(), rows.to_vec());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }
}
