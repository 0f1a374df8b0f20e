pub use crate::cli::{command, run_app};
pub use crate::config::Settings;
pub use crate::domain::{
    Contact, ContactDraft, ContactForm, ContactId, ContactList, ContactManager, ImportReport,
    ListAction, Store, Submission, Submitted, Summary, validation,
};
pub use crate::errors::AppError;
pub use crate::logging::{Verbosity, init_logging};
pub use crate::storage::{self, FileStorage, MemoryStorage, STORAGE_KEY, StorageBackend};
