//! Named slot storage.
//!
//! A slot is one structured-text document addressed by name, stored as
//! `{dir}/{slot}.json`. The store does not interpret the contents.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::atomic_write::{FileLock, write_atomic};
use super::error::StorageError;

/// Directory-backed key/value store of whole documents.
#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    const EXTENSION: &'static str = "json";

    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the file backing `slot`.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        let valid = !slot.is_empty()
            && !slot.starts_with('.')
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidSlot(slot.to_string()));
        }

        Ok(self.dir.join(format!("{}.{}", slot, Self::EXTENSION)))
    }

    /// Reads the raw contents of a slot; `None` if the slot was never written.
    pub fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the contents of a slot atomically.
    pub fn write(&self, slot: &str, contents: &[u8]) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        write_atomic(&path, contents)
    }

    /// Read-modify-write of a slot under an exclusive lock.
    ///
    /// `f` receives the current contents (or `None`) and returns the new ones.
    pub fn update<F>(&self, slot: &str, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(Option<Vec<u8>>) -> Result<Vec<u8>, StorageError>,
    {
        let path = self.slot_path(slot)?;
        let _lock = FileLock::acquire(&path)?;

        let current = self.read(slot)?;
        let next = f(current)?;
        write_atomic(&path, &next)
    }
}
