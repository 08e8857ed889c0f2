//! `KeyValueStore` over `window.localStorage`.

use common::ownership::{KeyValueStore, StorageError};
use web_sys::Storage;

/// Looks storage up on every call: private browsing modes may refuse it,
/// and then every operation reports [`StorageError::Unavailable`].
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

fn failed(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Failed(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(failed)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(failed)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(failed)
    }
}
