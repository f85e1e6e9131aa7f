//! View routing: which controller a page load activates.

use std::fmt;

use crate::page::{ids, Page};

/// The three page views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Contact list with filter and delete.
    Index,
    /// New-contact form.
    Add,
    /// Edit form for one contact.
    Detail,
}

impl View {
    /// Anchor element whose presence selects this view.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Index => ids::CONTACT_LIST,
            Self::Add => ids::FORM_ADD,
            Self::Detail => ids::FORM_DETAIL,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Index => "index",
            Self::Add => "add",
            Self::Detail => "detail",
        };
        f.write_str(name)
    }
}

/// Views in the order their anchors are checked.
const ROUTE_ORDER: [View; 3] = [View::Index, View::Add, View::Detail];

/// Picks the view for `page`, or `None` for an inert page.
///
/// The first view (Index, Add, Detail) whose anchor exists wins.
#[must_use]
pub fn route(page: &dyn Page) -> Option<View> {
    ROUTE_ORDER
        .into_iter()
        .find(|view| page.has_element(view.anchor()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;

    #[test]
    fn test_route_by_anchor() {
        assert_eq!(route(&MemoryPage::index()), Some(View::Index));
        assert_eq!(route(&MemoryPage::add()), Some(View::Add));
        assert_eq!(route(&MemoryPage::detail(Some("1"))), Some(View::Detail));
    }

    #[test]
    fn test_inert_page() {
        assert_eq!(route(&MemoryPage::new()), None);
        assert_eq!(route(&MemoryPage::new().with_element("something-else")), None);
    }

    #[test]
    fn test_first_anchor_wins() {
        let page = MemoryPage::new()
            .with_element(ids::FORM_DETAIL)
            .with_element(ids::CONTACT_LIST);
        assert_eq!(route(&page), Some(View::Index));
    }
}
