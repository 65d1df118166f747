//! Command-line arguments

use std::path::PathBuf;

use account_store_core::AccountType;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "account-store", version, about = "Manage locally stored user accounts")]
pub struct Cli {
    /// JSON store file (defaults to the platform data directory)
    #[arg(long, env = "ACCOUNT_STORE_PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Print accounts as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all accounts
    List,

    /// Add an account
    Add {
        /// Record ID (not checked for uniqueness)
        id: String,
        #[arg(long = "type", value_enum)]
        account_type: AccountTypeArg,
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: Option<String>,
        /// Labels separated by `;`
        #[arg(long, default_value = "")]
        labels: String,
    },

    /// Update fields of an existing account
    Update {
        id: String,
        #[arg(long = "type", value_enum)]
        account_type: Option<AccountTypeArg>,
        #[arg(long)]
        login: Option<String>,
        #[arg(long, conflicts_with = "clear_password")]
        password: Option<String>,
        /// Remove the stored password
        #[arg(long)]
        clear_password: bool,
        /// Labels separated by `;` (an empty string removes all labels)
        #[arg(long)]
        labels: Option<String>,
    },

    /// Remove an account
    Remove { id: String },

    /// Show the canonical form of a label string
    Labels { input: String },

    /// Delete every persisted account
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccountTypeArg {
    Ldap,
    Local,
}

impl From<AccountTypeArg> for AccountType {
    fn from(arg: AccountTypeArg) -> Self {
        match arg {
            AccountTypeArg::Ldap => Self::Ldap,
            AccountTypeArg::Local => Self::Local,
        }
    }
}
