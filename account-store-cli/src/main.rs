//! Command-line entry point for the account store
//!
//! Builds the process-wide `AppState` over a JSON file store and dispatches
//! one subcommand against it. Logs go to stderr, filtered by `RUST_LOG`.

mod cli;
mod commands;

use std::sync::Arc;

use account_store_app::adapters::JsonFileKeyValueStore;
use account_store_app::AppStateBuilder;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let storage = match cli.store {
        Some(path) => JsonFileKeyValueStore::new(path),
        None => JsonFileKeyValueStore::at_default_location()
            .context("No --store given and no default data directory")?,
    };
    tracing::debug!("Using store file {}", storage.path().display());

    let mut state = AppStateBuilder::new()
        .storage(Arc::new(storage))
        .build()
        .context("Failed to initialise account store")?;

    commands::run(&mut state, cli.command, cli.json)
}
