//! In-memory key-value store
//!
//! Lives as long as the process. An optional byte quota mimics browser storage
//! limits so quota failures can be exercised without a real backend.

use std::collections::HashMap;
use std::sync::RwLock;

use account_store_core::{KeyValueStore, StoreError, StoreResult};

use super::lock_poisoned;

/// Process-local key-value store
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    /// Maximum total size of keys plus values, in bytes
    quota: Option<usize>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: None,
        }
    }

    /// Create a store that rejects writes once keys plus values exceed `quota` bytes
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Total bytes used by keys and values
    pub fn used_bytes(&self) -> StoreResult<usize> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.iter().map(|(k, v)| k.len() + v.len()).sum())
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().map_err(lock_poisoned)?.remove(key);
        Ok(())
    }
}
