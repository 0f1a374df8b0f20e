use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque contact identifier. Generated ids are UUID v4 strings, but any
/// non-empty string read back from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn generate() -> Self {
        ContactId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        ContactId(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        ContactId(value)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,

    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// A contact's field set before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Contact {
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Contact {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
        }
    }

    /// Returns this record with every submitted field of `draft` laid over it.
    /// The id always comes from `self`.
    pub fn overlay(&self, draft: ContactDraft) -> Contact {
        Contact::from_draft(self.id.clone(), draft)
    }

    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match over "first last". An empty term
    /// matches every contact.
    pub fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self
                .full_name()
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}
