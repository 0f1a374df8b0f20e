use std::collections::HashMap;

use super::{AppError, StorageBackend};

/// Process-local backend. Nothing survives the process; used by tests and
/// benchmarks in place of a file.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.slots.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() -> Result<(), AppError> {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("contacts")?, None);

        storage.set("contacts", "[]")?;
        assert_eq!(storage.get("contacts")?.as_deref(), Some("[]"));

        storage.set("contacts", "[1]")?;
        assert_eq!(storage.get("contacts")?.as_deref(), Some("[1]"));

        storage.remove("contacts")?;
        storage.remove("contacts")?;
        assert!(!storage.contains("contacts"));
        Ok(())
    }
}
