use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::domain::contact::ContactDraft;
use crate::errors::AppError;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$";
pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";

pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Phone number must be 10 digits";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
        }
    }
}

/// One message per invalid field, kept in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FormErrors {
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, *msg))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("  {}: {}", field.label(), msg))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for FormErrors {}

pub fn validate_email(email: &str) -> Result<bool, AppError> {
    let re = Regex::new(EMAIL_PATTERN)?;
    Ok(re.is_match(email))
}

pub fn validate_phone(phone: &str) -> Result<bool, AppError> {
    // Exactly ten ASCII digits, nothing else
    let re = Regex::new(PHONE_PATTERN)?;
    Ok(re.is_match(phone))
}

/// Checks every field of an already-normalized draft. Address is free text.
pub fn validate_draft(draft: &ContactDraft) -> Result<FormErrors, AppError> {
    let mut errors = FormErrors::default();

    if draft.first_name.is_empty() {
        errors.insert(Field::FirstName, FIRST_NAME_REQUIRED);
    }
    if draft.last_name.is_empty() {
        errors.insert(Field::LastName, LAST_NAME_REQUIRED);
    }
    if !validate_email(&draft.email)? {
        errors.insert(Field::Email, EMAIL_INVALID);
    }
    if draft.phone.is_empty() {
        errors.insert(Field::Phone, PHONE_REQUIRED);
    } else if !validate_phone(&draft.phone)? {
        errors.insert(Field::Phone, PHONE_INVALID);
    }

    Ok(errors)
}
