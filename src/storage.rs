use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{DATA_DIR_NAME, STORAGE_FILE};

/// Errors raised while reading or writing the key/value file
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed storage file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable string key/value storage backed by a single JSON file.
///
/// Mirrors browser local storage: every `set` is written through to disk
/// immediately so a restart observes the last value.
#[derive(Debug)]
pub struct Storage {
    entries: BTreeMap<String, String>,
    path: PathBuf,
}

impl Storage {
    /// Open storage rooted at `dir`. A missing or unreadable file yields
    /// empty storage; the next successful write replaces it.
    pub fn open_in(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(STORAGE_FILE);
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable storage");
                BTreeMap::new()
            }
        };

        Storage { entries, path }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and flush to disk.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Re-read the file, discarding in-memory state
    pub fn reload(&mut self) {
        match load_entries(&self.path) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Reload failed, keeping current values");
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Default directory for persisted state and logs
pub fn default_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open_in(dir.path());
        storage.set("theme", "dark").unwrap();

        let reopened = Storage::open_in(dir.path());
        assert_eq!(reopened.get("theme"), Some("dark"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_in(dir.path().join("nested"));
        assert_eq!(storage.get("theme"), None);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();

        let mut storage = Storage::open_in(dir.path());
        assert_eq!(storage.get("theme"), None);

        storage.set("theme", "light").unwrap();
        assert_eq!(Storage::open_in(dir.path()).get("theme"), Some("light"));
    }

    #[test]
    fn test_failed_write_keeps_memory_value() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the directory should be makes the write fail
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "").unwrap();

        let mut storage = Storage::open_in(&blocker);
        assert!(storage.set("theme", "dark").is_err());
        assert_eq!(storage.get("theme"), Some("dark"));
    }
}
