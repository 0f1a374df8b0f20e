pub mod contact;
pub mod editor;
pub mod manager;
pub mod store;
pub mod validation;
pub mod viewer;

use crate::errors::AppError;
use crate::storage::StorageBackend;

pub use contact::{Contact, ContactDraft, ContactId};
pub use editor::{ContactForm, Submission};
pub use manager::{ContactManager, ImportReport, Submitted};
pub use store::Store;
pub use viewer::{ContactList, ListAction, Summary};
