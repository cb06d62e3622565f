// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit-code carrier for errors crossing the CLI boundary.

use thiserror::Error;

/// An error whose only job is to set the process exit code.
///
/// With an empty message, main prints nothing and just exits with the code.
/// Used when the failure was already rendered (the run summary).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn silent(code: i32) -> Self {
        Self {
            code,
            message: String::new(),
        }
    }
}
