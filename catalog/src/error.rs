//! Error types for catalog loading and dispatch.
//!
//! Wraps file I/O, serialization and command construction failures in one
//! enum so callers can use `?` across the whole catalog API.

use command_match_core::CommandError;
use thiserror::Error;

/// Errors that can occur while loading or using a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A command could not be built, parsed or coerced.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
