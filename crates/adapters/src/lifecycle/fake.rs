// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake lifecycle adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LifecycleAdapter, LifecycleError};
use async_trait::async_trait;
use drover_core::UnitId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded lifecycle call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleCall {
    Start(UnitId),
    Stop(UnitId),
}

struct FakeLifecycleState {
    calls: Vec<LifecycleCall>,
    start_errors: HashMap<UnitId, String>,
    stop_errors: HashMap<UnitId, String>,
}

/// Fake lifecycle adapter for testing
#[derive(Clone)]
pub struct FakeLifecycleAdapter {
    inner: Arc<Mutex<FakeLifecycleState>>,
}

impl Default for FakeLifecycleAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLifecycleState {
                calls: Vec::new(),
                start_errors: HashMap::new(),
                stop_errors: HashMap::new(),
            })),
        }
    }
}

impl FakeLifecycleAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LifecycleCall> {
        self.inner.lock().calls.clone()
    }

    /// Script a failure for the next start commands on a unit.
    pub fn set_start_error(&self, unit: UnitId, message: impl Into<String>) {
        self.inner.lock().start_errors.insert(unit, message.into());
    }

    /// Script a failure for the next stop commands on a unit.
    pub fn set_stop_error(&self, unit: UnitId, message: impl Into<String>) {
        self.inner.lock().stop_errors.insert(unit, message.into());
    }

    pub fn starts_for(&self, unit: UnitId) -> usize {
        self.count(&LifecycleCall::Start(unit))
    }

    pub fn stops_for(&self, unit: UnitId) -> usize {
        self.count(&LifecycleCall::Stop(unit))
    }

    fn count(&self, call: &LifecycleCall) -> usize {
        self.inner.lock().calls.iter().filter(|c| *c == call).count()
    }
}

#[async_trait]
impl LifecycleAdapter for FakeLifecycleAdapter {
    async fn start(&self, unit: UnitId) -> Result<(), LifecycleError> {
        let mut inner = self.inner.lock();
        inner.calls.push(LifecycleCall::Start(unit));
        match inner.start_errors.get(&unit) {
            Some(message) => Err(LifecycleError::CommandFailed {
                command: "start",
                unit,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn stop(&self, unit: UnitId) -> Result<(), LifecycleError> {
        let mut inner = self.inner.lock();
        inner.calls.push(LifecycleCall::Stop(unit));
        match inner.stop_errors.get(&unit) {
            Some(message) => Err(LifecycleError::CommandFailed {
                command: "stop",
                unit,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
