// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory adapters: enumerating the configured execution units.

mod console;

pub use console::ConsoleInventoryAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeInventoryAdapter;

use async_trait::async_trait;
use drover_core::UnitDescriptor;
use thiserror::Error;

/// Errors from inventory discovery.
///
/// These are whole-listing failures; an individual malformed row is skipped
/// with a warning instead, since the console pads its output with junk rows
/// for half-created units.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory command failed: {0}")]
    CommandFailed(String),
    #[error("inventory command exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
}

/// Adapter enumerating the units the console knows about.
#[async_trait]
pub trait InventoryAdapter: Clone + Send + Sync + 'static {
    /// List all configured units with their discovery-time state.
    async fn list(&self) -> Result<Vec<UnitDescriptor>, InventoryError>;
}
