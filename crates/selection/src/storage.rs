use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use crate::StorageError;

/// A durable string key-value store.
///
/// This plays the role a browser's local storage plays for a web page:
/// the selection store writes a single JSON document under a fixed key
/// and reads it back on startup.
pub trait Storage {
    /// Reads the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A [`Storage`] that lives in memory and is lost on drop.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    write_count: usize,
}

impl MemoryStorage {
    /// Creates a storage pre-populated with one entry.
    pub fn with_entry<K: Into<String>, V: Into<String>>(
        key: K,
        value: V,
    ) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries,
            write_count: 0,
        }
    }

    /// Returns how many times [`Storage::set`] has been called.
    #[inline]
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.write_count += 1;
        Ok(())
    }
}

/// A [`Storage`] keeping one `<key>.json` file per key in a directory.
///
/// Writes go to a temporary file that is synced and then renamed over
/// the target, so a crash never leaves a half-written value behind.
/// The directory is created on the first write.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`.
    #[inline]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the files.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;

        trace!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("selectedProducts").unwrap(), None);
    }

    #[test]
    fn test_file_storage_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        storage.set("selectedProducts", "[1]").unwrap();
        storage.set("selectedProducts", "[1,2]").unwrap();

        assert_eq!(
            storage.get("selectedProducts").unwrap().as_deref(),
            Some("[1,2]")
        );
        let names = fs::read_dir(storage.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, ["selectedProducts.json"]);
    }

    #[test]
    fn test_memory_storage_counts_writes() {
        let mut storage = MemoryStorage::default();
        storage.set("a", "1").unwrap();
        storage.set("a", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.write_count(), 2);
    }
}
