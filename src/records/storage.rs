//! Key-value storage collaborators for the record store.

use std::collections::HashMap;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// A string key-value store.
///
/// Writes replace the whole value for a key; there are no partial updates.
pub trait KeyValueStorage {
    /// Read the value for `key`, or `None` if nothing was stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used as a test fake and for throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if a previous session had written it.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Make subsequent writes fail, simulating an exhausted quota.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Current value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// failed write never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp_path = self.temp_path_for(key);

        let result = (|| {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::io(path, e));
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);
        storage.write("k", "[]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let mut storage = MemoryStorage::new().with_entry("k", "old");
        storage.set_fail_writes(true);
        assert!(matches!(
            storage.write("k", "new"),
            Err(StorageError::Rejected { .. })
        ));
        assert_eq!(storage.get("k"), Some("old"));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_file_storage_missing_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.read("quotes").unwrap(), None);
    }

    #[test]
    fn test_file_storage_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        storage.write("quotes", "[1]").unwrap();
        storage.write("quotes", "[1,2]").unwrap();

        assert_eq!(storage.read("quotes").unwrap().as_deref(), Some("[1,2]"));
        assert!(storage.path_for("quotes").exists());
        assert!(!storage.temp_path_for("quotes").exists());
    }

    #[test]
    fn test_file_storage_empty_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::write(storage.path_for("quotes"), "  \n").unwrap();
        assert_eq!(storage.read("quotes").unwrap(), None);
    }
}
