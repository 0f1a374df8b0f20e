use tracing::{debug, warn};

use super::*;
use crate::storage::csv::CsvRecord;

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(ContactId),
    Updated(ContactId),
    /// The record being edited was removed before the form was submitted.
    Vanished(ContactId),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: u64,
    pub updated: u64,
    pub skipped: u64,
}

/// Binds the store, the contact form and the list together.
///
/// Two pieces of state drive the flow: whether the form is visible and
/// which record (if any) is being edited.
pub struct ContactManager {
    store: Store,
    form: ContactForm,
    form_visible: bool,
    editing: Option<Contact>,
    search_term: String,
}

impl ContactManager {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            form: ContactForm::new(),
            form_visible: false,
            editing: None,
            search_term: String::new(),
        }
    }

    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        Self::new(Store::open(backend))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn editing(&self) -> Option<&Contact> {
        self.editing.as_ref()
    }

    /// "Add": show an empty form.
    pub fn open_add(&mut self) {
        self.editing = None;
        self.form_visible = true;
        self.form.reset(None);
    }

    /// "Edit": show the form pre-populated with `contact`.
    pub fn open_edit(&mut self, contact: Contact) {
        self.form.reset(Some(&contact));
        self.editing = Some(contact);
        self.form_visible = true;
    }

    /// Opens the form for the stored record with `id`. Returns `false` and
    /// leaves state untouched when there is none.
    pub fn open_edit_by_id(&mut self, id: &ContactId) -> bool {
        match self.store.get(id).cloned() {
            Some(contact) => {
                self.open_edit(contact);
                true
            }
            None => false,
        }
    }

    /// Submits the visible form. On success the store is mutated (add when
    /// nothing was being edited, update otherwise) and the form is hidden.
    /// Validation failures leave the form open with its error indicators.
    pub fn submit_form(&mut self) -> Result<Submitted, AppError> {
        if !self.form_visible {
            return Err(AppError::Validation("No contact form is open".to_string()));
        }

        let submitted = match self.form.submit()? {
            Submission::Create(draft) => Submitted::Added(self.store.add(draft)?),
            Submission::Update(contact) => {
                let id = contact.id.clone();
                if self.store.update(contact)? {
                    Submitted::Updated(id)
                } else {
                    Submitted::Vanished(id)
                }
            }
        };

        self.form_visible = false;
        self.editing = None;
        debug!(?submitted, "form submitted");
        Ok(submitted)
    }

    /// Feeds each record through the form as if typed by hand. Rows whose id
    /// names a stored contact edit it, every other row creates a contact.
    /// Rows failing validation are skipped.
    pub fn import(&mut self, records: Vec<CsvRecord>) -> Result<ImportReport, AppError> {
        let mut report = ImportReport::default();

        for (row, record) in records.into_iter().enumerate() {
            let existing = record
                .id()
                .and_then(|id| self.store.get(&ContactId::from(id)).cloned());

            match existing {
                Some(contact) => self.open_edit(contact),
                None => self.open_add(),
            }
            self.form.fill(record.to_draft());

            match self.submit_form() {
                Ok(Submitted::Added(_)) => report.added += 1,
                Ok(Submitted::Updated(_)) => report.updated += 1,
                Ok(Submitted::Vanished(_)) => report.skipped += 1,
                Err(AppError::Form(errors)) => {
                    // +2: one for the header, one for zero-based rows
                    warn!(row = row + 2, %errors, "skipping invalid csv row");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        self.form_visible = false;
        self.editing = None;
        self.form.reset(None);
        Ok(report)
    }

    /// Removes the record with `id`; `false` when there was none.
    pub fn delete(&mut self, id: &ContactId) -> Result<bool, AppError> {
        self.store.remove(id)
    }

    /// Handles an action picked from the contact list.
    pub fn dispatch(&mut self, action: ListAction) -> Result<(), AppError> {
        match action {
            ListAction::Edit(contact) => self.open_edit(contact),
            ListAction::Delete(id) => {
                self.delete(&id)?;
            }
        }
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.store.query(&self.search_term)
    }

    pub fn contact_list(&self) -> ContactList<'_> {
        ContactList::new(self.visible_contacts())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.store.len(),
            results: self.visible_contacts().len(),
        }
    }

    /// Summary line followed by the filtered list.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.summary().render(), self.contact_list().render())
    }
}
