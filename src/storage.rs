//! The string key-value store that holds persisted data.
//!
//! `FileStorage` keeps one file per key in a directory. `MemoryStorage` holds everything in memory
//! and is compiled into the production build as well, so that the store can be driven end-to-end
//! without touching the filesystem.

use crate::{utils, Result};
use anyhow::{bail, Context};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// A durable string-keyed slot store.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
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

    /// The file that backs `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("get_item {key} from {}", path.display());
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read file at {}", path.display())),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("set_item {key} to {}", path.display());

        // Write a sibling file and rename it over the slot so a crash never leaves half a file
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        utils::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await.with_context(|| {
            format!(
                "Unable to move '{}' to '{}'",
                tmp.to_string_lossy(),
                path.to_string_lossy()
            )
        })
    }
}

/// Keeps slots in memory. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `MemoryStorage` seeded with `key` already holding `value`.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().insert(key.into(), value.into());
        storage
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written String behind
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keys become file names, so they are limited to a safe character set.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("The storage key cannot be empty")
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        bail!("The storage key '{key}' contains the invalid character '{bad}'")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("expenses").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_set_then_get() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set_item("expenses", "[1]").await.unwrap();
        storage.set_item("expenses", "[2]").await.unwrap();
        assert_eq!(
            storage.get_item("expenses").await.unwrap().as_deref(),
            Some("[2]")
        );
        assert!(dir.path().join("expenses.json").is_file());
        assert!(!dir.path().join(".expenses.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_storage_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.set_item("../escape", "x").await.is_err());
        assert!(storage.get_item("").await.is_err());
    }

    #[tokio::test]
    async fn test_file_storage_missing_dir_write_is_error() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("not-there"));
        assert!(storage.set_item("expenses", "[]").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_slots() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item("k", "v").await.unwrap();
        assert_eq!(b.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(b.get_item("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_with_item() {
        let storage = MemoryStorage::with_item("expenses", "[]");
        assert_eq!(
            storage.get_item("expenses").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
