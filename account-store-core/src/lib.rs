//! Account Store Core Library
//!
//! Provides the platform-independent logic behind the account management UI:
//! - Account Store (ordered account collection with persistence on every mutation)
//! - Label Codec (free-form label string <-> structured label list)
//!
//! Persistence is abstracted through the [`KeyValueStore`] trait, so the same
//! store runs against browser-like storage, a JSON file or an in-memory map.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{StoreError, StoreResult};
pub use services::{AccountStore, ACCOUNTS_KEY};
pub use traits::{AccountsObserver, KeyValueStore};
pub use types::{AccountType, Label, UserAccount, UserAccountUpdate};
pub use utils::labels::{format_labels, normalize_labels, parse_labels};
