//! Account collection store
//!
//! Owns the ordered list of accounts. Every effective mutation writes the whole
//! collection to the durable store and then notifies observers; storage
//! failures are logged and remembered, never returned to the caller.

use std::sync::Arc;

use crate::error::StoreError;
use crate::traits::{AccountsObserver, KeyValueStore};
use crate::types::{UserAccount, UserAccountUpdate};

/// Durable storage key holding the serialized collection
pub const ACCOUNTS_KEY: &str = "account-management-accounts";

/// Account collection store
///
/// Construct one per process (see `AppState` in the app crate) and pass it to
/// whatever needs it.
pub struct AccountStore {
    storage: Arc<dyn KeyValueStore>,
    accounts: Vec<UserAccount>,
    observers: Vec<Arc<dyn AccountsObserver>>,
    load_error: Option<StoreError>,
    last_persist_error: Option<StoreError>,
}

impl AccountStore {
    /// Create the store and seed it from `storage`
    ///
    /// A missing, unreadable or malformed stored value yields an empty collection.
    /// Individual records that fail to decode are dropped, the rest are kept.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (accounts, load_error) = Self::load(storage.as_ref());
        Self {
            storage,
            accounts,
            observers: Vec::new(),
            load_error,
            last_persist_error: None,
        }
    }

    // ===== Read access =====

    /// All accounts in insertion order
    #[must_use]
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    /// First account with the given ID
    #[must_use]
    pub fn find_account(&self, id: &str) -> Option<&UserAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Why stored accounts were discarded or dropped at the last load, if any were
    #[must_use]
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// Cause of the most recent failed write, cleared by the next successful one
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&StoreError> {
        self.last_persist_error.as_ref()
    }

    // ===== Mutations =====

    /// Append an account. IDs are not checked for uniqueness.
    pub fn add_account(&mut self, account: UserAccount) {
        log::debug!("Adding account: {}", account.id);
        self.accounts.push(account);
        self.commit();
    }

    /// Shallow-merge `updates` into the first account with `id`
    ///
    /// Unknown IDs are ignored.
    pub fn update_account(&mut self, id: &str, updates: &UserAccountUpdate) {
        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            log::debug!("Update ignored, account not found: {id}");
            return;
        };
        updates.apply_to(account);
        log::debug!("Updated account: {id}");
        self.commit();
    }

    /// Remove the first account with `id`, keeping the order of the rest
    ///
    /// Unknown IDs are ignored.
    pub fn remove_account(&mut self, id: &str) {
        let Some(index) = self.accounts.iter().position(|a| a.id == id) else {
            log::debug!("Remove ignored, account not found: {id}");
            return;
        };
        self.accounts.remove(index);
        log::debug!("Removed account: {id}");
        self.commit();
    }

    /// Change the first account with `id` in place
    ///
    /// Returns `false` (and does not write) when no account matches.
    pub fn modify_account<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut UserAccount),
    {
        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        f(account);
        self.commit();
        true
    }

    /// Register an observer notified after every effective mutation
    pub fn subscribe(&mut self, observer: Arc<dyn AccountsObserver>) {
        self.observers.push(observer);
    }

    /// Replace the in-memory collection with what the durable store holds
    ///
    /// Does not write back. Observers are notified with the reloaded collection.
    pub fn reload(&mut self) {
        let (accounts, load_error) = Self::load(self.storage.as_ref());
        self.accounts = accounts;
        self.load_error = load_error;
        self.notify();
    }

    // ===== Persistence =====

    fn load(storage: &dyn KeyValueStore) -> (Vec<UserAccount>, Option<StoreError>) {
        let raw = match storage.get(ACCOUNTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No stored accounts under {ACCOUNTS_KEY}, starting empty");
                return (Vec::new(), None);
            }
            Err(e) => {
                log::warn!("Failed to read stored accounts, starting empty: {e}");
                return (Vec::new(), Some(e));
            }
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Stored accounts are malformed, starting empty: {e}");
                return (Vec::new(), Some(e.into()));
            }
        };

        // Keep every record that decodes; one bad record must not cost the rest
        let total = records.len();
        let mut accounts = Vec::with_capacity(total);
        let mut first_error = None;
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<UserAccount>(record) {
                Ok(account) => accounts.push(account),
                Err(e) => {
                    log::error!(
                        "Dropping stored account #{index}, it will not be written back: {e}"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        let skipped = total - accounts.len();
        log::info!("Loaded {} accounts from storage", accounts.len());
        let load_error = first_error.map(|e| {
            StoreError::Serialization(format!("{skipped} of {total} stored accounts dropped: {e}"))
        });
        (accounts, load_error)
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.accounts)
            .map_err(StoreError::from)
            .and_then(|json| self.storage.set(ACCOUNTS_KEY, &json));

        match result {
            Ok(()) => {
                log::debug!("Persisted {} accounts", self.accounts.len());
                self.last_persist_error = None;
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Failed to persist accounts, keeping in-memory changes: {e}");
                } else {
                    log::error!("Failed to persist accounts, keeping in-memory changes: {e}");
                }
                self.last_persist_error = Some(e);
            }
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.accounts_changed(&self.accounts);
        }
    }
}
