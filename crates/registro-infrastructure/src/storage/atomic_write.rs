//! Temp-file-and-rename writes and advisory file locks.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::Path;

use fs2::FileExt;
use tempfile::NamedTempFile;

use super::error::StorageError;

/// Writes `contents` to `path` so that readers see either the old or the new
/// file, never a partial one.
///
/// The data goes to a uniquely named sibling temp file, is fsynced, then
/// renamed over the target.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let parent = path.parent().ok_or_else(|| {
        StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        ))
    })?;
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_file = NamedTempFile::new_in(parent)?;
    tmp_file.write_all(contents)?;
    tmp_file.as_file().sync_all()?;
    tmp_file.persist(path).map_err(|e| StorageError::Io(e.error))?;

    Ok(())
}

/// An exclusive advisory lock on `<file>.lock`, released when dropped.
///
/// The lock file is never removed: every holder must lock the same inode.
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock guarding `path`, blocking until available.
    pub(crate) fn acquire(path: &Path) -> Result<Self, StorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_leaves_only_target() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        let path = nested.join("slot.json");

        write_atomic(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        let entries: Vec<_> = fs::read_dir(&nested).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_lock_file_survives_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");

        {
            let _lock = FileLock::acquire(&path).unwrap();
            assert!(temp_dir.path().join("slot.lock").exists());
        }
        assert!(temp_dir.path().join("slot.lock").exists());

        // Released: a second acquisition does not block.
        let _again = FileLock::acquire(&path).unwrap();
    }
}
