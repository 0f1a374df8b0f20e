use crate::domain::contact::{Contact, ContactDraft};
use crate::domain::validation::{Field, FormErrors, validate_draft};
use crate::errors::AppError;

/// What a successful form submission hands back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A new record; the store assigns its id.
    Create(ContactDraft),
    /// An existing record with the submitted fields laid over it.
    Update(Contact),
}

/// Input state for creating or editing one contact.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    original: Option<Contact>,
    fields: ContactDraft,
    errors: FormErrors,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_contact(contact: &Contact) -> Self {
        let mut form = Self::new();
        form.reset(Some(contact));
        form
    }

    /// Switches mode. Fields are pre-populated from `contact` (edit mode) or
    /// emptied (create mode); error indicators are cleared either way.
    pub fn reset(&mut self, contact: Option<&Contact>) {
        self.original = contact.cloned();
        self.fields = contact.map(Contact::to_draft).unwrap_or_default();
        self.errors = FormErrors::default();
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Update Contact"
        } else {
            "Add New Contact"
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.fields.first_name = value,
            Field::LastName => self.fields.last_name = value,
            Field::Email => self.fields.email = value,
            Field::Phone => self.fields.phone = value,
            Field::Address => self.fields.address = value,
        }
    }

    /// Replaces every input with the fields of `draft`.
    pub fn fill(&mut self, draft: ContactDraft) {
        self.fields = draft;
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.fields.first_name,
            Field::LastName => &self.fields.last_name,
            Field::Email => &self.fields.email,
            Field::Phone => &self.fields.phone,
            Field::Address => &self.fields.address,
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    fn normalized(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.fields.first_name.trim().to_string(),
            last_name: self.fields.last_name.trim().to_string(),
            email: self.fields.email.clone(),
            phone: self.fields.phone.clone(),
            address: self.fields.address.trim().to_string(),
        }
    }

    /// Validates the current input. On success the normalized record is
    /// returned and the form is cleared; on failure the per-field errors are
    /// kept on the form and returned, and nothing is emitted.
    pub fn submit(&mut self) -> Result<Submission, AppError> {
        let draft = self.normalized();

        let errors = validate_draft(&draft)?;
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(AppError::Form(errors));
        }

        let submission = match &self.original {
            Some(original) => Submission::Update(original.overlay(draft)),
            None => Submission::Create(draft),
        };

        self.reset(None);
        Ok(submission)
    }
}
