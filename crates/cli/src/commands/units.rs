// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drover units`: list the discovered inventory.

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use drover_adapters::{ConsoleInventoryAdapter, InventoryAdapter};
use drover_core::Config;
use std::path::Path;

#[derive(Args)]
pub struct UnitsArgs {
    /// Only show units currently running
    #[arg(long)]
    running: bool,
}

pub async fn execute(config_flag: Option<&Path>, args: UnitsArgs) -> Result<()> {
    let config = Config::resolve(config_flag)?;

    let inventory = ConsoleInventoryAdapter::new(&config.console.program);
    let mut units = inventory.list().await.context("discovery failed")?;

    if args.running {
        units.retain(|unit| unit.running);
    }

    output::print_units(&units);
    Ok(())
}
