//! Per-browser memory of which slots this browser claimed, and with which
//! email.
//!
//! This is advisory only. It decides whether Edit/Delete are offered; the
//! backend re-checks the email on every mutating request regardless. It must
//! never be treated as authentication.
//!
//! Storage failures are logged and swallowed: losing the memory costs the
//! visitor their Edit/Delete buttons, never their signup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("persistent storage is unavailable")]
    Unavailable,

    #[error("storage operation failed: {0}")]
    Failed(String),
}

/// String key/value capability backing the ownership store (`localStorage`
/// in the browser, a map in tests).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Deterministic storage key for a claim.
pub fn ownership_key(event_id: &str, role_name: &str) -> String {
    format!("volunteer-signup:{event_id}:{role_name}")
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Remember / recall / forget over an injected [`KeyValueStore`]. Cheap to
/// clone; clones share the backing store.
#[derive(Clone)]
pub struct OwnershipStore {
    backend: Rc<dyn KeyValueStore>,
}

impl OwnershipStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Records that this browser claimed `role_name` with `email`.
    pub fn remember(&self, event_id: &str, role_name: &str, email: &str) {
        let key = ownership_key(event_id, role_name);
        if let Err(err) = self.backend.set(&key, &normalize_email(email)) {
            log::error!("could not remember signup ownership for {key}: {err}");
        }
    }

    /// Email this browser used for `role_name`, if it remembers one.
    pub fn recall(&self, event_id: &str, role_name: &str) -> Option<String> {
        let key = ownership_key(event_id, role_name);
        match self.backend.get(&key) {
            Ok(value) => value.filter(|email| !email.is_empty()),
            Err(err) => {
                log::error!("could not read signup ownership for {key}: {err}");
                None
            }
        }
    }

    pub fn forget(&self, event_id: &str, role_name: &str) {
        let key = ownership_key(event_id, role_name);
        if let Err(err) = self.backend.delete(&key) {
            log::error!("could not forget signup ownership for {key}: {err}");
        }
    }

    /// Whether this browser should offer Edit/Delete for a filled slot.
    ///
    /// When the record exposes its email (admin view) the remembered email
    /// must also match it.
    pub fn owns(&self, event_id: &str, role_name: &str, record_email: Option<&str>) -> bool {
        match (self.recall(event_id, role_name), record_email) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(remembered), Some(email)) => remembered == normalize_email(email),
        }
    }
}

/// In-memory [`KeyValueStore`]; used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
