//! Crate-wide error type.
//!
//! Placement itself never fails; these errors only come from the edges
//! of the crate (user input, catalog lookups, assets, persistence).

use crate::storage::StorageError;
use thiserror::Error;

/// Errors produced by the pegwall core.
#[derive(Debug, Error)]
pub enum PegwallError {
    #[error("Invalid wall dimensions: {width}\" x {height}\"")]
    InvalidWall { width: f64, height: f64 },
    #[error("Unknown furniture group: {0}")]
    UnknownGroup(String),
    #[error("Unknown variant {variant} in group {group}")]
    UnknownVariant { group: String, variant: String },
    #[error("Unknown color {color} in group {group}")]
    UnknownColor { group: String, color: String },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoad { path: String, reason: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for pegwall operations.
pub type Result<T> = std::result::Result<T, PegwallError>;
