use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::contact::{Contact, ContactDraft, ContactId};
use crate::errors::AppError;
use crate::storage::{STORAGE_KEY, StorageBackend};

/// The authoritative contact collection, mirrored to a storage backend.
///
/// Every mutation rewrites the whole collection under [`STORAGE_KEY`].
pub struct Store {
    contacts: Vec<Contact>,
    backend: Box<dyn StorageBackend>,
}

enum Loaded {
    Absent,
    Unreadable(AppError),
    Malformed(String),
    Contacts(Vec<Contact>),
}

/// The stored `id` of a record, if it has a usable one. Empty strings,
/// zero, `false` and `null` do not count as ids; other scalars are kept in
/// their string form.
fn stored_id(record: &Value) -> Option<ContactId> {
    match record.get("id")? {
        Value::String(id) if !id.is_empty() => Some(ContactId::from(id.as_str())),
        Value::Number(n) if n.as_f64().is_some_and(|n| n != 0.0) => {
            Some(ContactId::from(n.to_string()))
        }
        Value::Bool(true) => Some(ContactId::from("true")),
        value @ (Value::Array(_) | Value::Object(_)) => Some(ContactId::from(value.to_string())),
        _ => None,
    }
}

/// A text field of a stored record. Missing and `null` read as empty.
fn stored_text(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

impl Store {
    /// Builds a store over `backend` and loads whatever it holds.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let mut store = Store {
            contacts: Vec::new(),
            backend,
        };
        store.load();
        store
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Absent or unreadable data yields an empty collection. Malformed data
    /// (not an array, or a record without an id) also yields an empty
    /// collection and the persisted copy is discarded.
    pub fn load(&mut self) -> &[Contact] {
        self.contacts = match self.read_persisted() {
            Loaded::Absent => Vec::new(),
            Loaded::Unreadable(e) => {
                warn!(backend = self.backend.name(), error = %e, "stored contacts unreadable, starting empty");
                Vec::new()
            }
            Loaded::Malformed(reason) => {
                warn!(backend = self.backend.name(), %reason, "discarding malformed stored contacts");
                if let Err(e) = self.backend.remove(STORAGE_KEY) {
                    warn!(error = %e, "failed to clear malformed stored contacts");
                }
                Vec::new()
            }
            Loaded::Contacts(contacts) => contacts,
        };

        debug!(backend = self.backend.name(), count = self.contacts.len(), "contacts loaded");
        &self.contacts
    }

    fn read_persisted(&self) -> Loaded {
        let data = match self.backend.get(STORAGE_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => return Loaded::Absent,
            Err(e) => return Loaded::Unreadable(e),
        };

        let value: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => return Loaded::Malformed(format!("not JSON: {e}")),
        };

        let Some(records) = value.as_array() else {
            return Loaded::Malformed("expected an array of contacts".to_string());
        };

        let mut contacts = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = stored_id(record) else {
                return Loaded::Malformed("contact without an id".to_string());
            };
            contacts.push(Contact {
                id,
                first_name: stored_text(record, "firstName"),
                last_name: stored_text(record, "lastName"),
                email: stored_text(record, "email"),
                phone: stored_text(record, "phone"),
                address: stored_text(record, "address"),
            });
        }
        Loaded::Contacts(contacts)
    }

    fn persist(&mut self) -> Result<(), AppError> {
        let data = serde_json::to_string(&self.contacts)?;
        self.backend.set(STORAGE_KEY, &data)?;

        debug!(backend = self.backend.name(), count = self.contacts.len(), "contacts persisted");
        Ok(())
    }

    fn fresh_id(&self) -> ContactId {
        loop {
            let id = ContactId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Assigns a new id, appends the record and persists.
    pub fn add(&mut self, draft: ContactDraft) -> Result<ContactId, AppError> {
        let id = self.fresh_id();
        self.contacts.push(Contact::from_draft(id.clone(), draft));
        self.persist()?;

        info!(%id, "contact added");
        Ok(id)
    }

    /// Replaces the record with the same id and persists. Returns `false`,
    /// touching nothing, when no record has that id.
    pub fn update(&mut self, contact: Contact) -> Result<bool, AppError> {
        let Some(slot) = self.contacts.iter_mut().find(|c| c.id == contact.id) else {
            debug!(id = %contact.id, "update of unknown contact ignored");
            return Ok(false);
        };

        let id = contact.id.clone();
        *slot = contact;
        self.persist()?;

        info!(%id, "contact updated");
        Ok(true)
    }

    /// Deletes the record with `id` and persists. Returns `false`, touching
    /// nothing, when no record has that id.
    pub fn remove(&mut self, id: &ContactId) -> Result<bool, AppError> {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id != id);

        if self.contacts.len() == before {
            debug!(%id, "removal of unknown contact ignored");
            return Ok(false);
        }

        self.persist()?;

        info!(%id, "contact removed");
        Ok(true)
    }

    /// Contacts whose "first last" name contains `term`, case-insensitively,
    /// in insertion order. An empty term returns everything.
    pub fn query(&self, term: &str) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.matches(term)).collect()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Resolves a full id or an unambiguous id prefix. `Ok(None)` when
    /// nothing matches.
    pub fn resolve_id(&self, text: &str) -> Result<Option<ContactId>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("No id provided".to_string()));
        }

        if let Some(contact) = self.contacts.iter().find(|c| c.id.as_str() == text) {
            return Ok(Some(contact.id.clone()));
        }

        let candidates: Vec<&Contact> = self
            .contacts
            .iter()
            .filter(|c| c.id.as_str().starts_with(text))
            .collect();

        match candidates.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(only.id.clone())),
            many => Err(AppError::Validation(format!(
                "id prefix '{text}' matches {} contacts, please provide more characters",
                many.len()
            ))),
        }
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn jane() -> ContactDraft {
        ContactDraft {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "1234567890".to_string(),
            address: String::new(),
        }
    }

    fn alice() -> ContactDraft {
        ContactDraft {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone: "0987654321".to_string(),
            address: "12 Elm Street".to_string(),
        }
    }

    fn persisted(store: &Store) -> Option<Vec<Contact>> {
        let data = store.backend().get(STORAGE_KEY).ok()??;
        serde_json::from_str(&data).ok()
    }

    #[test]
    fn add_update_remove_scenario() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));

        let id = store.add(jane())?;
        assert_eq!(store.len(), 1);
        assert!(!id.as_str().is_empty());

        let mut edited = store.get(&id).cloned().ok_or(AppError::NotFound("Contact".to_string()))?;
        edited.last_name = "Roe".to_string();
        assert!(store.update(edited)?);

        let updated = store.get(&id).ok_or(AppError::NotFound("Contact".to_string()))?;
        assert_eq!(updated.last_name, "Roe");
        assert_eq!(updated.email, "jane@x.com");

        assert!(store.remove(&id)?);
        assert!(store.is_empty());
        assert_eq!(persisted(&store), Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn every_mutation_is_persisted() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));

        store.add(jane())?;
        assert_eq!(persisted(&store).map(|c| c.len()), Some(1));

        let id = store.add(alice())?;
        assert_eq!(persisted(&store).map(|c| c.len()), Some(2));

        store.remove(&id)?;
        assert_eq!(persisted(&store).map(|c| c.len()), Some(1));
        Ok(())
    }

    #[test]
    fn ids_are_unique() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        for _ in 0..50 {
            store.add(jane())?;
        }

        let mut ids: Vec<&ContactId> = store.contacts().iter().map(|c| &c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        Ok(())
    }

    #[test]
    fn round_trip_preserves_order_and_content() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        store.add(jane())?;
        store.add(alice())?;
        let before = store.contacts().to_vec();

        store.load();
        assert_eq!(store.contacts(), before.as_slice());
        Ok(())
    }

    #[test]
    fn remove_twice_equals_remove_once() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        let id = store.add(jane())?;
        store.add(alice())?;

        assert!(store.remove(&id)?);
        let after_once = store.contacts().to_vec();

        assert!(!store.remove(&id)?);
        assert_eq!(store.contacts(), after_once.as_slice());
        Ok(())
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        store.add(jane())?;
        let before = store.contacts().to_vec();

        let stranger = Contact::from_draft(ContactId::from("missing"), alice());
        assert!(!store.update(stranger)?);
        assert_eq!(store.contacts(), before.as_slice());
        Ok(())
    }

    #[test]
    fn query_matches_full_name_case_insensitively() -> Result<(), AppError> {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        store.add(jane())?;
        store.add(alice())?;

        let found = store.query("ALI");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Alice");

        assert_eq!(store.query("e d").len(), 1);
        assert_eq!(store.query("").len(), 2);
        assert!(store.query("zed").is_empty());
        Ok(())
    }

    #[test]
    fn non_array_data_is_discarded() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, r#"{"foo":1}"#);
        let store = Store::open(Box::new(storage));

        assert!(store.is_empty());
        assert!(matches!(store.backend().get(STORAGE_KEY), Ok(None)));
    }

    #[test]
    fn record_without_id_discards_everything() {
        let storage = MemoryStorage::with_entry(
            STORAGE_KEY,
            r#"[{"id":"1","firstName":"A","lastName":"B"},{"firstName":"C","lastName":"D"}]"#,
        );
        let store = Store::open(Box::new(storage));

        assert!(store.is_empty());
        assert!(matches!(store.backend().get(STORAGE_KEY), Ok(None)));
    }

    #[test]
    fn unparsable_data_is_discarded() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "[{oops");
        let store = Store::open(Box::new(storage));

        assert!(store.is_empty());
        assert!(matches!(store.backend().get(STORAGE_KEY), Ok(None)));
    }

    #[test]
    fn well_formed_data_is_loaded() {
        let storage = MemoryStorage::with_entry(
            STORAGE_KEY,
            r#"[{"id":"abc","firstName":"Alice","lastName":"Smith","email":"a@b.co","phone":"1234567890","address":""}]"#,
        );
        let store = Store::open(Box::new(storage));

        assert_eq!(store.len(), 1);
        assert_eq!(store.contacts()[0].id, ContactId::from("abc"));
    }

    #[test]
    fn null_and_non_string_fields_are_loaded_leniently() {
        let storage = MemoryStorage::with_entry(
            STORAGE_KEY,
            r#"[{"id":"a","firstName":"Alice","lastName":"Smith","email":"a@b.co","phone":1234567890,"address":null}]"#,
        );
        let store = Store::open(Box::new(storage));

        assert_eq!(store.len(), 1);
        let alice = &store.contacts()[0];
        assert_eq!(alice.phone, "1234567890");
        assert_eq!(alice.address, "");
        assert!(matches!(store.backend().get(STORAGE_KEY), Ok(Some(_))));
    }

    #[test]
    fn numeric_id_is_kept_as_text() {
        let storage = MemoryStorage::with_entry(
            STORAGE_KEY,
            r#"[{"id":5,"firstName":"Bob","lastName":"Stone"}]"#,
        );
        let store = Store::open(Box::new(storage));

        assert_eq!(store.len(), 1);
        assert_eq!(store.contacts()[0].id, ContactId::from("5"));
        assert_eq!(store.contacts()[0].email, "");
        assert!(matches!(store.backend().get(STORAGE_KEY), Ok(Some(_))));
    }

    #[test]
    fn falsy_ids_are_malformed() {
        for data in [r#"[{"id":""}]"#, r#"[{"id":0}]"#, r#"[{"id":null}]"#, r#"[{"id":false}]"#, r#"["abc"]"#] {
            let store = Store::open(Box::new(MemoryStorage::with_entry(STORAGE_KEY, data)));

            assert!(store.is_empty(), "{data} should not load");
            assert!(matches!(store.backend().get(STORAGE_KEY), Ok(None)));
        }
    }

    #[test]
    fn resolve_id_accepts_unique_prefix() -> Result<(), AppError> {
        let storage = MemoryStorage::with_entry(
            STORAGE_KEY,
            r#"[{"id":"abc-1"},{"id":"abd-2"},{"id":"xyz"}]"#,
        );
        let store = Store::open(Box::new(storage));

        assert_eq!(store.resolve_id("xyz")?, Some(ContactId::from("xyz")));
        assert_eq!(store.resolve_id("abc")?, Some(ContactId::from("abc-1")));
        assert_eq!(store.resolve_id("nope")?, None);
        assert!(matches!(store.resolve_id("ab"), Err(AppError::Validation(_))));
        Ok(())
    }
}
