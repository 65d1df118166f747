//! Business logic service layer

mod account_store;

pub use account_store::{AccountStore, ACCOUNTS_KEY};
