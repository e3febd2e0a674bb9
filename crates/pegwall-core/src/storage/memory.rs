//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::layout::SavedLayout;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory storage for tests and sessions without persistence.
#[derive(Default)]
pub struct MemoryStorage {
    layouts: RwLock<HashMap<String, SavedLayout>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(e: PoisonError<T>) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let layout = layout.clone();
        Box::pin(async move {
            self.layouts.write().map_err(lock_error)?.insert(key, layout);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<SavedLayout>> {
        let key = key.to_string();
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            layouts
                .get(&key)
                .cloned()
                .ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.layouts.write().map_err(lock_error)?.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            Ok(layouts.keys().cloned().collect())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.layouts.read().map_err(lock_error)?.contains_key(&key)) })
    }
}
