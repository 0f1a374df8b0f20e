pub mod csv;
pub mod file;
pub mod memory;

use std::fs;
use std::path::Path;

use crate::errors::AppError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Slot under which the contact collection is persisted.
pub const STORAGE_KEY: &str = "contacts";

/// A string key-value slot store, the persistence medium behind the
/// contact store. Every write replaces the slot's value wholesale.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), AppError>;

    fn name(&self) -> &str;
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
