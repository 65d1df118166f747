//! Durable key-value storage abstract Trait

use crate::error::StoreResult;

/// String-keyed, string-valued durable store
///
/// Every operation may fail (quota exceeded, storage disabled, I/O errors),
/// so callers must treat all of them as fallible.
///
/// Platform implementation:
/// - `MemoryKeyValueStore` (process-local, optional quota)
/// - `JsonFileKeyValueStore` (single JSON file on disk)
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Arguments
    /// * `key` - Storage key
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Arguments
    /// * `key` - Storage key
    /// * `value` - Serialized value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value stored under `key` (no-op if absent)
    ///
    /// # Arguments
    /// * `key` - Storage key
    fn remove(&self, key: &str) -> StoreResult<()>;
}
