// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use drover_adapters::InventoryError;
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Everything unit-scoped (lifecycle failures, spawn failures, timeouts,
/// monitoring faults) is contained inside that unit's supervisor and lands in
/// its [`drover_core::JobOutcome`] instead; only a failed discovery pass has
/// nothing to contain it and propagates to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("discovery failed: {0}")]
    Discovery(#[from] InventoryError),
}
