// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker adapters: spawning and supervising the per-unit worker process.

mod process;

pub use process::ProcessWorkerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWorkerAdapter, WorkerScript};

use async_trait::async_trait;
use drover_core::UnitId;
use thiserror::Error;

/// Errors from worker process operations.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn worker for unit {unit}: {message}")]
    Spawn { unit: UnitId, message: String },
    #[error("failed waiting on worker for unit {unit}: {message}")]
    Wait { unit: UnitId, message: String },
}

/// Exit information of a finished worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExit {
    /// Process exit code; `None` when the worker died to a signal.
    pub code: Option<i32>,
}

impl WorkerExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A spawned worker under supervision.
#[async_trait]
pub trait WorkerHandle: Send {
    /// Wait for the worker to exit on its own.
    async fn wait(&mut self) -> Result<WorkerExit, WorkerError>;

    /// Forcibly terminate the worker and every process it spawned.
    ///
    /// Must be safe to call on an already-dead worker; the supervisor calls
    /// it on the timeout and fault paths without knowing whether the process
    /// is still there.
    async fn kill_tree(&mut self) -> Result<(), WorkerError>;
}

/// Adapter spawning one worker process per unit.
///
/// The worker receives the unit index as its sole argument and is expected
/// to exit on its own; the orchestrator learns nothing else from it.
#[async_trait]
pub trait WorkerAdapter: Clone + Send + Sync + 'static {
    type Handle: WorkerHandle + 'static;

    async fn spawn(&self, unit: UnitId) -> Result<Self::Handle, WorkerError>;
}
