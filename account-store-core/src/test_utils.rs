//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::services::{AccountStore, ACCOUNTS_KEY};
use crate::traits::{AccountsObserver, KeyValueStore};
use crate::types::UserAccount;

// ===== MockKeyValueStore =====

pub struct MockKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    /// If Some, `set` returns this error
    set_error: RwLock<Option<StoreError>>,
    /// If Some, `get` returns this error
    get_error: RwLock<Option<StoreError>>,
    set_calls: Mutex<usize>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            set_error: RwLock::new(None),
            get_error: RwLock::new(None),
            set_calls: Mutex::new(0),
        }
    }

    /// Pre-populate the accounts key with a raw value
    pub fn with_raw_accounts(self, raw: &str) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(ACCOUNTS_KEY.to_string(), raw.to_string());
        self
    }

    pub fn set_set_error(&self, err: Option<StoreError>) {
        *self.set_error.write().unwrap() = err;
    }

    pub fn set_get_error(&self, err: Option<StoreError>) {
        *self.get_error.write().unwrap() = err;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    pub fn set_calls(&self) -> usize {
        *self.set_calls.lock().unwrap()
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if let Some(ref err) = *self.get_error.read().unwrap() {
            return Err(err.clone());
        }
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        *self.set_calls.lock().unwrap() += 1;
        if let Some(ref err) = *self.set_error.read().unwrap() {
            return Err(err.clone());
        }
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

// ===== RecordingObserver =====

/// Records every collection snapshot it is notified with
pub struct RecordingObserver {
    snapshots: Mutex<Vec<Vec<UserAccount>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshots(&self) -> Vec<Vec<UserAccount>> {
        self.snapshots.lock().unwrap().clone()
    }
}

impl AccountsObserver for RecordingObserver {
    fn accounts_changed(&self, accounts: &[UserAccount]) {
        self.snapshots.lock().unwrap().push(accounts.to_vec());
    }
}

// ===== Factory methods =====

/// Create an empty store backed by a fresh mock storage
pub fn create_test_store() -> (AccountStore, Arc<MockKeyValueStore>) {
    let storage = Arc::new(MockKeyValueStore::new());
    let store = AccountStore::new(storage.clone());
    (store, storage)
}

/// Decode whatever the store last wrote under the accounts key
pub fn persisted_accounts(storage: &MockKeyValueStore) -> Vec<UserAccount> {
    let raw = storage.raw(ACCOUNTS_KEY).unwrap();
    serde_json::from_str(&raw).unwrap()
}
