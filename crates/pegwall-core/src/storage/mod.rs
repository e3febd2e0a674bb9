//! Persistence of saved layouts.
//!
//! The configurator hands a layout to the print view by writing it under
//! [`HANDOFF_KEY`]. Any backend implementing [`Storage`] can hold it.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::layout::SavedLayout;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Key the current layout is handed off under.
pub const HANDOFF_KEY: &str = "pegwall_data";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend holding saved layouts by key.
///
/// On native platforms implementations must be Send + Sync.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a layout under `key`, replacing any previous one.
    fn save(&self, key: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the layout stored under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<SavedLayout>>;

    /// Delete a layout. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Backend holding saved layouts by key (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a layout under `key`, replacing any previous one.
    fn save(&self, key: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the layout stored under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<SavedLayout>>;

    /// Delete a layout. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Platform-specific default backend.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create the default backend for this platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(LocalStorage::new()?))
}
