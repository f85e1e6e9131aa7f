//! Contact records and identifiers.
//!
//! A [`Contact`] is the only entity the system stores. Its serialized form
//! uses the field names of the persisted collection (`nom`, `telefon`), so a
//! stored blob and a seed document share the same shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer identifier of a contact, unique within a collection.
///
/// Ids are assigned as `max + 1` and never reused.
///
/// # Examples
///
/// ```
/// use contactes::ContactId;
///
/// let id: ContactId = "7".parse().unwrap();
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.next(), Some(ContactId::new(8)));
/// assert_eq!(ContactId::new(u64::MAX).next(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    /// The id given to the first contact of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `u64::MAX`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl From<u64> for ContactId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Immutable identifier.
    pub id: ContactId,
    /// Display name, matched by the list filter.
    #[serde(rename = "nom")]
    pub name: String,
    /// Email address (format not validated).
    pub email: String,
    /// Phone number (format not validated).
    #[serde(rename = "telefon")]
    pub phone: String,
}

impl Contact {
    /// Builds a contact from an id and the mutable fields of a draft.
    #[must_use]
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        }
    }

    /// Overwrites the mutable fields, keeping the id.
    pub fn apply(&mut self, draft: ContactDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.phone = draft.phone;
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn name_contains_lowercase(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }
}

/// The mutable fields of a contact, as read from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl ContactDraft {
    /// Creates a draft from its three fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// The whole ordered set of contacts, persisted as one unit.
pub type Collection = Vec<Contact>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_serializes_with_persisted_field_names() {
        let contact = Contact::from_draft(ContactId::new(3), ContactDraft::new("Cara", "c@x.com", "111"));
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "nom": "Cara", "email": "c@x.com", "telefon": "111"})
        );
    }

    #[test]
    fn test_contact_deserializes_seed_shape() {
        let raw = r#"[{"id":1,"nom":"Ana","email":"a@x.com","telefon":"600"}]"#;
        let contacts: Collection = serde_json::from_str(raw).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, ContactId::FIRST);
        assert_eq!(contacts[0].name, "Ana");
        assert_eq!(contacts[0].phone, "600");
    }

    #[test]
    fn test_contact_id_parse() {
        assert_eq!(" 42 ".parse::<ContactId>().unwrap(), ContactId::new(42));
        assert!("abc".parse::<ContactId>().is_err());
        assert!("-1".parse::<ContactId>().is_err());
        assert!("".parse::<ContactId>().is_err());
        assert!("3abc".parse::<ContactId>().is_err());
    }

    #[test]
    fn test_negative_ids_are_rejected_on_decode() {
        let raw = r#"[{"id":-1,"nom":"Ana","email":"","telefon":""}]"#;
        assert!(serde_json::from_str::<Collection>(raw).is_err());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut contact = Contact::from_draft(ContactId::new(5), ContactDraft::new("Ana", "a", "1"));
        contact.apply(ContactDraft::new("Anna", "b", "2"));
        assert_eq!(contact.id, ContactId::new(5));
        assert_eq!(contact.name, "Anna");
        assert_eq!(contact.email, "b");
        assert_eq!(contact.phone, "2");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let contact = Contact::from_draft(ContactId::new(1), ContactDraft::new("Ana Puig", "", ""));
        assert!(contact.name_contains_lowercase("puig"));
        assert!(contact.name_contains_lowercase("a p"));
        assert!(contact.name_contains_lowercase(""));
        assert!(!contact.name_contains_lowercase("ben"));
    }
}
