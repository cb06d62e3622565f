// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! drover - fleet orchestrator CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{run, units};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "drover",
    version,
    about = "Drives a fleet of virtualized instances through one-shot worker jobs"
)]
struct Cli {
    /// Path to the config file (falls back to $DROVER_CONFIG, then ./drover.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one discovery-and-drain pass over the unit inventory
    Run(run::RunArgs),
    /// List the units the console knows about
    Units(units::UnitsArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    match cli.command {
        Some(Commands::Run(args)) => run::execute(cli.config.as_deref(), args).await,
        Some(Commands::Units(args)) => units::execute(cli.config.as_deref(), args).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|source| top.contains(&source.to_string()));

    if chain_redundant {
        return top;
    }

    let mut rendered = top;
    for source in err.chain().skip(1) {
        rendered.push_str(&format!("\n  caused by: {}", source));
    }
    rendered
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
