//! Durable key-value storage for the theme document
//!
//! The document is persisted whole, as JSON, under a single key.

use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::document::ThemeDocument;
use crate::error::StorageError;

/// Key the serialized document is stored under
pub const STORAGE_KEY: &str = "swatch-theme-styles";

/// A durable string store
pub trait ThemeStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, optionally refusing writes to emulate a full quota
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: IndexMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail
    pub fn read_only() -> Self {
        Self {
            entries: IndexMap::new(),
            read_only: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ThemeStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory
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

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ThemeStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Load the persisted document, falling back to the defaults
///
/// Missing keys, unreadable storage and malformed JSON all recover to
/// [`ThemeDocument::default`].
pub fn restore(storage: &dyn ThemeStorage) -> ThemeDocument {
    match storage.load(STORAGE_KEY) {
        Ok(Some(json)) => match ThemeDocument::from_json(&json) {
            Ok(doc) => {
                tracing::debug!("restored theme document from storage");
                doc
            }
            Err(err) => {
                tracing::warn!("stored theme document is invalid, using defaults: {}", err);
                ThemeDocument::default()
            }
        },
        Ok(None) => ThemeDocument::default(),
        Err(err) => {
            tracing::warn!("theme storage unreadable, using defaults: {}", err);
            ThemeDocument::default()
        }
    }
}

/// Write the whole document; failures are logged and the change stays in memory
pub fn persist(doc: &ThemeDocument, storage: &mut dyn ThemeStorage) -> bool {
    let json = match doc.to_json() {
        Ok(json) => json,
        Err(err) => {
            tracing::error!("failed to serialize theme document: {}", err);
            return false;
        }
    };
    match storage.save(STORAGE_KEY, &json) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("failed to persist theme document: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_missing_is_default() {
        let storage = MemoryStorage::new();
        assert_eq!(restore(&storage), ThemeDocument::default());
    }

    #[test]
    fn test_restore_malformed_is_default() {
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, "{not json");
        assert_eq!(restore(&storage), ThemeDocument::default());
    }

    #[test]
    fn test_persist_then_restore() {
        let mut storage = MemoryStorage::new();
        let mut doc = ThemeDocument::default();
        doc.radius = "12px".to_string();

        assert!(persist(&doc, &mut storage));
        assert_eq!(restore(&storage), doc);
    }

    #[test]
    fn test_persist_failure_is_reported() {
        let mut storage = MemoryStorage::read_only();
        assert!(!persist(&ThemeDocument::default(), &mut storage));
        assert!(storage.get(STORAGE_KEY).is_none());
    }
}
