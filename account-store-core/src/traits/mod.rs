//! Storage layer abstraction trait definition

mod accounts_observer;
mod key_value_store;

pub use accounts_observer::AccountsObserver;
pub use key_value_store::KeyValueStore;
