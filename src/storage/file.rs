use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{AppError, StorageBackend, create_file_parent};

pub const DEFAULT_STORAGE_PATH: &str = "./.instance/storage.json";

type Slots = BTreeMap<String, String>;

/// Key-value slots kept as one JSON object on disk, e.g.
/// `{"contacts": "[{\"id\":\"...\"}]"}`. Values are opaque strings.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_slots(&self) -> Result<Slots, AppError> {
        if !fs::exists(&self.path)? {
            return Ok(Slots::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(Slots::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    /// Slots to rewrite on the next write. A file that is not a JSON object
    /// of strings is replaced rather than blocking every write.
    fn slots_for_write(&self) -> Result<Slots, AppError> {
        match self.read_slots() {
            Ok(slots) => Ok(slots),
            Err(AppError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "replacing unreadable storage file");
                Ok(Slots::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let data = serde_json::to_string_pretty(slots)?;
        file.write_all(data.as_bytes())?;

        debug!(path = %self.path.display(), slots = slots.len(), "storage file written");
        Ok(())
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut slots = self.read_slots()?;
        Ok(slots.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut slots = self.slots_for_write()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        if !fs::exists(&self.path)? {
            return Ok(());
        }

        let mut slots = self.slots_for_write()?;
        slots.remove(key);
        self.write_slots(&slots)
    }

    fn name(&self) -> &str {
        "file"
    }
}
