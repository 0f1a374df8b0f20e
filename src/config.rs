use std::path::PathBuf;

use dotenv::dotenv;

use crate::logging::Verbosity;
use crate::storage::{FileStorage, StorageBackend, file::DEFAULT_STORAGE_PATH};

pub const STORAGE_PATH_ENV: &str = "CONTACTS_STORAGE_PATH";

/// Pulls a `.env` file, if any, into the process environment. Must run
/// before command-line parsing so `env = ...` arguments can see it.
pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_path: PathBuf,
    pub verbosity: Verbosity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            verbosity: Verbosity::default(),
        }
    }
}

impl Settings {
    pub fn storage(&self) -> Box<dyn StorageBackend> {
        Box::new(FileStorage::new(&self.storage_path))
    }
}
