//! Errors of the storage layer.

use registro_core::RegistroError;
use thiserror::Error;

/// Errors that can occur during slot and config file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// File locking error.
    #[error("Lock error: {0}")]
    Lock(String),
    /// Slot name that cannot be mapped to a file.
    #[error("Invalid slot name: '{0}'")]
    InvalidSlot(String),
}

impl From<StorageError> for RegistroError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => e.into(),
            StorageError::TomlParse(e) => e.into(),
            StorageError::TomlSer(e) => e.into(),
            StorageError::Json(e) => e.into(),
            StorageError::Lock(message) => RegistroError::data_access(message),
            StorageError::InvalidSlot(slot) => {
                RegistroError::config(format!("invalid slot name '{}'", slot))
            }
        }
    }
}
