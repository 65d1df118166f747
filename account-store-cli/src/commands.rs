//! Subcommand handlers

use account_store_app::AppState;
use account_store_core::{
    format_labels, normalize_labels, parse_labels, UserAccount, UserAccountUpdate,
};
use anyhow::{bail, Result};

use crate::cli::Command;

pub fn run(state: &mut AppState, command: Command, json: bool) -> Result<()> {
    match command {
        Command::List => list(state, json),
        Command::Add {
            id,
            account_type,
            login,
            password,
            labels,
        } => {
            let account = UserAccount {
                id,
                labels: parse_labels(&labels),
                account_type: account_type.into(),
                login,
                password,
            };
            if !account.follows_password_convention() {
                tracing::warn!(
                    "{} account {} {} a password",
                    account.account_type,
                    account.id,
                    if account.password.is_some() { "has" } else { "lacks" }
                );
            }
            state.store_mut().add_account(account);
            report_persist_error(state);
            Ok(())
        }
        Command::Update {
            id,
            account_type,
            login,
            password,
            clear_password,
            labels,
        } => {
            if state.store().find_account(&id).is_none() {
                bail!("Account not found: {id}");
            }
            let updates = UserAccountUpdate {
                id: None,
                labels: labels.as_deref().map(parse_labels),
                account_type: account_type.map(Into::into),
                login,
                password: if clear_password {
                    Some(None)
                } else {
                    password.map(Some)
                },
            };
            if updates.is_empty() {
                bail!("Nothing to update for account {id}");
            }
            state.store_mut().update_account(&id, &updates);
            report_persist_error(state);
            Ok(())
        }
        Command::Remove { id } => {
            if state.store().find_account(&id).is_none() {
                bail!("Account not found: {id}");
            }
            state.store_mut().remove_account(&id);
            report_persist_error(state);
            Ok(())
        }
        Command::Labels { input } => {
            println!("{}", normalize_labels(&input));
            Ok(())
        }
        Command::Clear => {
            state.clear_storage()?;
            Ok(())
        }
    }
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let accounts = state.store().accounts();
    if json {
        println!("{}", serde_json::to_string_pretty(accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No accounts");
        return Ok(());
    }
    for account in accounts {
        println!(
            "{}\t{}\t{}\t{}",
            account.id,
            account.account_type,
            account.login,
            format_labels(&account.labels)
        );
    }
    Ok(())
}

/// The edit already happened in memory; a failed write only warrants a warning.
fn report_persist_error(state: &AppState) {
    if let Some(e) = state.store().last_persist_error() {
        tracing::warn!("Change was not saved: {e}");
    }
}
