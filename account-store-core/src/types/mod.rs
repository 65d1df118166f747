//! Type definition module

mod account;
mod label;

pub use account::{AccountType, UserAccount, UserAccountUpdate};
pub use label::Label;
