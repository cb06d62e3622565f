// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle adapters: starting and stopping execution units.

mod console;

pub use console::ConsoleLifecycleAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLifecycleAdapter, LifecycleCall};

use async_trait::async_trait;
use drover_core::UnitId;
use thiserror::Error;

/// Errors from start/stop commands.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{command} for unit {unit} failed: {message}")]
    CommandFailed {
        command: &'static str,
        unit: UnitId,
        message: String,
    },
}

/// Adapter issuing start/stop commands for a unit.
///
/// Both commands are fire-and-forget-with-wait: a returned `Ok` means the
/// issuing command finished, not that the unit is operational. Readiness is
/// approximated by the supervisor's boot-settle wait.
#[async_trait]
pub trait LifecycleAdapter: Clone + Send + Sync + 'static {
    async fn start(&self, unit: UnitId) -> Result<(), LifecycleError>;

    async fn stop(&self, unit: UnitId) -> Result<(), LifecycleError>;
}
