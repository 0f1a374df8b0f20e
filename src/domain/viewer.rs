use crate::domain::contact::{Contact, ContactId};

pub const PLACEHOLDER: &str = "Not provided";
pub const EMPTY_TITLE: &str = "No contacts found";
pub const EMPTY_HINT: &str = "Try adjusting your search terms";

/// A per-record action picked from the list, handed to whoever owns the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Edit(Contact),
    Delete(ContactId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub results: usize,
}

impl Summary {
    pub fn render(&self) -> String {
        format!(
            "Total Contacts: {} | Search Results: {}",
            self.total, self.results
        )
    }
}

/// Read-only view over an already filtered list of contacts.
#[derive(Debug)]
pub struct ContactList<'a> {
    contacts: Vec<&'a Contact>,
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

impl<'a> ContactList<'a> {
    pub fn new(contacts: Vec<&'a Contact>) -> Self {
        Self { contacts }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Edit action for the record at `position` (zero based).
    pub fn edit(&self, position: usize) -> Option<ListAction> {
        self.contacts
            .get(position)
            .map(|&contact| ListAction::Edit(contact.clone()))
    }

    /// Delete action for the record at `position` (zero based).
    pub fn delete(&self, position: usize) -> Option<ListAction> {
        self.contacts
            .get(position)
            .map(|contact| ListAction::Delete(contact.id.clone()))
    }

    pub fn render_entry(position: usize, contact: &Contact) -> String {
        format!(
            "{:>3}. {}  [{}]\n     Email:   {}\n     Phone:   {}\n     Address: {}",
            position + 1,
            contact.full_name(),
            contact.id,
            or_placeholder(&contact.email),
            or_placeholder(&contact.phone),
            or_placeholder(&contact.address),
        )
    }

    pub fn render(&self) -> String {
        if self.contacts.is_empty() {
            return format!("{EMPTY_TITLE}\n{EMPTY_HINT}");
        }

        self.contacts
            .iter()
            .enumerate()
            .map(|(i, contact)| Self::render_entry(i, contact))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
