//! JSON file backed key-value store
//!
//! All keys live in one JSON object file, the way the desktop app's store
//! plugin keeps its `*.json` stores. The file is read lazily into a cache and
//! rewritten atomically (temp file + rename) on every change.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use account_store_core::{KeyValueStore, StoreError, StoreResult};
use serde_json::{Map, Value};

use super::lock_poisoned;

const APP_DIR_NAME: &str = "account-management";
const STORE_FILE_NAME: &str = "store.json";
const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

type Entries = Map<String, Value>;

/// Key-value store persisted to a single JSON file
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    /// In-memory cache, `None` until first access
    cache: RwLock<Option<Entries>>,
}

impl JsonFileKeyValueStore {
    /// Create a store backed by the file at `path` (created on first write)
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create a store at the platform default location:
    /// - macOS: `~/Library/Application Support/account-management/store.json`
    /// - Windows: `%LOCALAPPDATA%/account-management/store.json`
    /// - Linux: `~/.local/share/account-management/store.json`
    pub fn at_default_location() -> StoreResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Platform default store file path
    pub fn default_path() -> StoreResult<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
            .ok_or_else(|| {
                StoreError::Unavailable("cannot determine local data directory".to_string())
            })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the backing file
    fn load_from_file(&self) -> StoreResult<Entries> {
        if !self.path.exists() {
            log::debug!("Store file does not exist: {}", self.path.display());
            return Ok(Entries::new());
        }

        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| StoreError::Storage(format!("Failed to read store file metadata: {e}")))?;
        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(StoreError::Storage(format!(
                "Store file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Storage(format!("Failed to read store file: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            other => Err(StoreError::Serialization(format!(
                "Invalid store format: expected an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Write entries to a temp file next to the target, then rename over it
    fn write_to_file(&self, entries: &Entries) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| StoreError::Storage(format!("Failed to write store file: {e}")))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| StoreError::Storage(format!("Failed to replace store file: {e}")))?;
        Ok(())
    }

    /// Run `f` against the cached entries, loading them on first use
    fn read_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> StoreResult<R> {
        // Check cache first (read lock)
        {
            let cache = self.cache.read().map_err(lock_poisoned)?;
            if let Some(ref entries) = *cache {
                return Ok(f(entries));
            }
        }

        // Cache empty, acquire write lock and load (double-check)
        let mut cache = self.cache.write().map_err(lock_poisoned)?;
        if cache.is_none() {
            *cache = Some(self.load_from_file()?);
        }
        Ok(f(cache.get_or_insert_with(Entries::new)))
    }

    /// Apply `change` to a copy of the entries, persist it, then swap it into the cache
    fn write_entries(&self, change: impl FnOnce(&mut Entries)) -> StoreResult<()> {
        let mut cache = self.cache.write().map_err(lock_poisoned)?;
        let mut entries = match cache.as_ref() {
            Some(entries) => entries.clone(),
            None => match self.load_from_file() {
                Ok(entries) => entries,
                // Unparseable file: start over so this write replaces it
                Err(StoreError::Serialization(e)) => {
                    log::warn!(
                        "Store file {} is corrupt, replacing it: {e}",
                        self.path.display()
                    );
                    Entries::new()
                }
                Err(e) => return Err(e),
            },
        };

        change(&mut entries);
        self.write_to_file(&entries)?;
        *cache = Some(entries);
        Ok(())
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.read_entries(|entries| {
            entries.get(key).map(|value| match value {
                Value::String(s) => s.clone(),
                // Hand-edited files may hold raw JSON instead of a string
                other => other.to_string(),
            })
        })
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.write_entries(|entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        })?;
        log::debug!("Saved key {key} to {}", self.path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.write_entries(|entries| {
            entries.remove(key);
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
