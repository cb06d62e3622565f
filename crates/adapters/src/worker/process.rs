// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-backed worker adapter.

use super::{WorkerAdapter, WorkerError, WorkerExit, WorkerHandle};
use async_trait::async_trait;
use drover_core::UnitId;
use std::path::PathBuf;
use tokio::process::{Child, Command};

/// Worker adapter spawning `<program> <index>` as a real child process.
///
/// On Unix the worker leads its own process group, so a timeout kill reaches
/// every descendant it forked; a stuck worker must not leave orphans behind.
#[derive(Clone)]
pub struct ProcessWorkerAdapter {
    program: PathBuf,
}

impl ProcessWorkerAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl WorkerAdapter for ProcessWorkerAdapter {
    type Handle = ProcessWorkerHandle;

    async fn spawn(&self, unit: UnitId) -> Result<Self::Handle, WorkerError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(unit.to_string());
        cmd.kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|source| WorkerError::Spawn {
            unit,
            message: source.to_string(),
        })?;

        tracing::debug!(unit = %unit, pid = ?child.id(), "worker spawned");
        Ok(ProcessWorkerHandle { child, unit })
    }
}

/// Handle over one spawned worker process.
pub struct ProcessWorkerHandle {
    child: Child,
    unit: UnitId,
}

#[async_trait]
impl WorkerHandle for ProcessWorkerHandle {
    async fn wait(&mut self) -> Result<WorkerExit, WorkerError> {
        let status = self.child.wait().await.map_err(|source| WorkerError::Wait {
            unit: self.unit,
            message: source.to_string(),
        })?;
        Ok(WorkerExit {
            code: status.code(),
        })
    }

    async fn kill_tree(&mut self) -> Result<(), WorkerError> {
        #[cfg(unix)]
        if let Some(pid) = self.child.id() {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            // The worker leads its own group, so the group id is its pid.
            // Failure usually means the group is already gone.
            if let Err(err) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                tracing::debug!(unit = %self.unit, %err, "process group kill failed");
            }
        }

        // Reap the direct child; ignore failure, it may already have exited.
        if let Err(err) = self.child.kill().await {
            tracing::debug!(unit = %self.unit, %err, "worker kill after group kill failed");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
