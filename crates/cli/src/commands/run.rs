// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drover run`: one discovery-and-drain pass.

use crate::exit_error::ExitError;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use drover_adapters::{ConsoleInventoryAdapter, ConsoleLifecycleAdapter, ProcessWorkerAdapter};
use drover_core::Config;
use drover_engine::{EngineDeps, Orchestrator, ProcStatSampler};
use std::path::Path;
use tokio_util::sync::CancellationToken;

#[derive(Args)]
pub struct RunArgs {
    /// Override the configured slot pool size
    #[arg(long)]
    pool: Option<usize>,
}

pub async fn execute(config_flag: Option<&Path>, args: RunArgs) -> Result<()> {
    let config = Config::resolve(config_flag)?;

    let mut scheduler = config.scheduler.clone();
    if let Some(pool) = args.pool {
        scheduler.pool_size = pool;
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let orchestrator = Orchestrator::new(
        EngineDeps {
            inventory: ConsoleInventoryAdapter::new(&config.console.program),
            lifecycle: ConsoleLifecycleAdapter::new(&config.console.program),
            workers: ProcessWorkerAdapter::new(&config.worker.program),
            sampler: ProcStatSampler::new(),
        },
        &scheduler,
        cancel,
    );

    let summary = orchestrator
        .run()
        .await
        .context("discovery-and-drain pass failed")?;

    output::print_summary(&summary);

    if !summary.is_healthy() {
        // The summary already names the failed units.
        return Err(ExitError::silent(2).into());
    }
    Ok(())
}

/// First Ctrl-C drains: in-flight units finish their stop command, nothing
/// new starts. A second Ctrl-C is left to the default handler.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, draining in-flight units");
            cancel.cancel();
        }
    });
}
