//! Atomic TOML file operations.
//!
//! Used for the application settings file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::atomic_write::{FileLock, write_atomic};
use super::error::StorageError;

/// A handle to a TOML file that is always replaced as a whole.
///
/// Writes go through a temp file and a rename; `load_or_init` holds an
/// exclusive lock while it checks for and creates the file.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic TOML file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    pub fn save(&self, data: &T) -> Result<(), StorageError> {
        let toml_string = toml::to_string_pretty(data)?;
        write_atomic(&self.path, toml_string.as_bytes())
    }

    /// Loads the file, or writes `default_value` and returns it when the file
    /// is missing or empty.
    pub fn load_or_init(&self, default_value: T) -> Result<T, StorageError> {
        let _lock = FileLock::acquire(&self.path)?;

        match self.load()? {
            Some(data) => Ok(data),
            None => {
                self.save(&default_value)?;
                Ok(default_value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    fn default_config() -> TestConfig {
        TestConfig {
            name: "default".to_string(),
            count: 0,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let atomic_file = AtomicTomlFile::<TestConfig>::new(temp_dir.path().join("test.toml"));

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };
        atomic_file.save(&config).unwrap();

        assert_eq!(atomic_file.load().unwrap(), Some(config));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let atomic_file = AtomicTomlFile::<TestConfig>::new(temp_dir.path().join("missing.toml"));

        assert!(atomic_file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_or_init_writes_default_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.toml");
        let atomic_file = AtomicTomlFile::<TestConfig>::new(path.clone());

        let loaded = atomic_file.load_or_init(default_config()).unwrap();
        assert_eq!(loaded, default_config());
        assert!(path.exists());

        let mut changed = loaded;
        changed.count = 7;
        atomic_file.save(&changed).unwrap();

        let reloaded = atomic_file.load_or_init(default_config()).unwrap();
        assert_eq!(reloaded.count, 7);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.toml");
        fs::write(&path, "name = [unterminated").unwrap();

        let atomic_file = AtomicTomlFile::<TestConfig>::new(path);
        assert!(matches!(atomic_file.load(), Err(StorageError::TomlParse(_))));
    }
}
