// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console-backed lifecycle adapter.

use super::{LifecycleAdapter, LifecycleError};
use crate::subprocess::{run_with_timeout, LIFECYCLE_TIMEOUT};
use async_trait::async_trait;
use drover_core::UnitId;
use std::path::PathBuf;
use tokio::process::Command;

/// Lifecycle adapter shelling out to `<program> start -i N` / `stop -i N`.
#[derive(Clone)]
pub struct ConsoleLifecycleAdapter {
    program: PathBuf,
}

impl ConsoleLifecycleAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, verb: &'static str, unit: UnitId) -> Result<(), LifecycleError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(verb).arg("-i").arg(unit.to_string());

        let description = format!("console {verb}");
        let output = run_with_timeout(cmd, LIFECYCLE_TIMEOUT, &description)
            .await
            .map_err(|message| LifecycleError::CommandFailed {
                command: verb,
                unit,
                message,
            })?;

        if !output.status.success() {
            return Err(LifecycleError::CommandFailed {
                command: verb,
                unit,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl LifecycleAdapter for ConsoleLifecycleAdapter {
    async fn start(&self, unit: UnitId) -> Result<(), LifecycleError> {
        self.run("start", unit).await
    }

    async fn stop(&self, unit: UnitId) -> Result<(), LifecycleError> {
        self.run("stop", unit).await
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
