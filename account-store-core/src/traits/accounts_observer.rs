//! Account collection change notification

use crate::types::UserAccount;

/// Receives the full collection after every effective mutation
///
/// Called synchronously on the mutating thread, after the collection has been
/// written to the durable store (whether or not the write succeeded).
pub trait AccountsObserver: Send + Sync {
    fn accounts_changed(&self, accounts: &[UserAccount]);
}
