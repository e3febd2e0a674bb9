//! Browser `localStorage` implementation for WebAssembly.
//!
//! Layouts are stored as JSON strings. Keys carry [`KEY_PREFIX`], except
//! the hand-off key which the print view reads directly.

use super::{BoxFuture, HANDOFF_KEY, Storage, StorageError, StorageResult};
use crate::layout::SavedLayout;
use wasm_bindgen::JsValue;

/// Prefix for keys other than the hand-off key.
pub const KEY_PREFIX: &str = "pegwall:";

/// `window.localStorage` backed storage.
pub struct LocalStorage {
    storage: web_sys::Storage,
    handoff_key: String,
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Other(format!("localStorage error: {:?}", e))
}

impl LocalStorage {
    /// Open the window's local storage with the default hand-off key.
    pub fn new() -> StorageResult<Self> {
        Self::with_handoff_key(HANDOFF_KEY)
    }

    /// Open the window's local storage. `handoff_key` is stored unprefixed.
    pub fn with_handoff_key(handoff_key: &str) -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self {
            storage,
            handoff_key: handoff_key.to_string(),
        })
    }

    pub fn handoff_key(&self) -> &str {
        &self.handoff_key
    }

    fn storage_key(&self, key: &str) -> String {
        if key == self.handoff_key {
            key.to_string()
        } else {
            format!("{}{}", KEY_PREFIX, key)
        }
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage.get_item(&self.storage_key(key)).map_err(js_error)
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>> {
        let key = self.storage_key(key);
        let json = layout.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            self.storage.set_item(&key, &json).map_err(js_error)
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<SavedLayout>> {
        let key = key.to_string();
        Box::pin(async move {
            let json = self.get(&key)?.ok_or_else(|| StorageError::NotFound(key.clone()))?;
            SavedLayout::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", key, e))
            })
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = self.storage_key(key);
        Box::pin(async move { self.storage.remove_item(&key).map_err(js_error) })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let len = self.storage.length().map_err(js_error)?;
            let mut keys = Vec::new();
            for index in 0..len {
                let Some(key) = self.storage.key(index).map_err(js_error)? else {
                    continue;
                };
                if key == self.handoff_key {
                    keys.push(key);
                } else if let Some(name) = key.strip_prefix(KEY_PREFIX) {
                    keys.push(name.to_string());
                }
            }
            Ok(keys)
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.get(&key)?.is_some()) })
    }
}
