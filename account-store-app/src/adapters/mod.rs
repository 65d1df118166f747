//! Platform-agnostic storage adapters for frontends (CLI, tests, embedding).

mod memory_store;

#[cfg(feature = "file-store")]
mod json_file_store;

pub use memory_store::MemoryKeyValueStore;

#[cfg(feature = "file-store")]
pub use json_file_store::JsonFileKeyValueStore;

use std::sync::PoisonError;

use account_store_core::StoreError;

/// Map a poisoned lock to a storage error
fn lock_poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Storage("storage lock poisoned".to_string())
}
