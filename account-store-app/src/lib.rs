//! Platform-agnostic application bootstrap for the account store.
//!
//! Provides `AppState` (owns the single `AccountStore` of the process) and
//! `AppStateBuilder` (storage adapter and observer injection).

pub mod adapters;

use std::sync::Arc;

use account_store_core::{
    AccountStore, AccountsObserver, KeyValueStore, StoreError, StoreResult, ACCOUNTS_KEY,
};

/// Platform-agnostic application state.
///
/// Every frontend constructs this once at startup via `AppStateBuilder` and
/// passes it explicitly to whatever needs the store.
pub struct AppState {
    /// Durable storage shared with the store
    storage: Arc<dyn KeyValueStore>,
    /// Account collection
    store: AccountStore,
}

impl AppState {
    /// Read access to the account store
    #[must_use]
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Mutable access to the account store
    pub fn store_mut(&mut self) -> &mut AccountStore {
        &mut self.store
    }

    /// Storage adapter backing the store
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    /// Delete the persisted collection and reset the store to empty.
    pub fn clear_storage(&mut self) -> StoreResult<()> {
        self.storage.remove(ACCOUNTS_KEY)?;
        self.store.reload();
        log::info!("Cleared persisted accounts");
        Ok(())
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `storage` — where the account collection is persisted
///
/// # Optional
/// - `observer` — any number of change observers, registered in order
pub struct AppStateBuilder {
    storage: Option<Arc<dyn KeyValueStore>>,
    observers: Vec<Arc<dyn AccountsObserver>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: None,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn AccountsObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the `AppState`, loading the persisted collection.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if no storage adapter was provided.
    pub fn build(self) -> StoreResult<AppState> {
        let storage = self
            .storage
            .ok_or_else(|| StoreError::Unavailable("storage is required".to_string()))?;

        let mut store = AccountStore::new(Arc::clone(&storage));
        if let Some(e) = store.load_error() {
            log::warn!("Persisted accounts were discarded at startup: {e}");
        }
        for observer in self.observers {
            store.subscribe(observer);
        }

        log::info!("Account store ready with {} accounts", store.len());
        Ok(AppState { storage, store })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
