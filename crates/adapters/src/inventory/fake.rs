// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake inventory adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InventoryAdapter, InventoryError};
use async_trait::async_trait;
use drover_core::{UnitDescriptor, UnitId};
use parking_lot::Mutex;
use std::sync::Arc;

struct FakeInventoryState {
    units: Vec<UnitDescriptor>,
    failure: Option<String>,
    list_calls: usize,
}

/// Fake inventory adapter for testing
#[derive(Clone)]
pub struct FakeInventoryAdapter {
    inner: Arc<Mutex<FakeInventoryState>>,
}

impl Default for FakeInventoryAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeInventoryState {
                units: Vec::new(),
                failure: None,
                list_calls: 0,
            })),
        }
    }
}

impl FakeInventoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory of stopped units with generated titles.
    pub fn with_units(indexes: impl IntoIterator<Item = u32>) -> Self {
        let adapter = Self::new();
        for index in indexes {
            adapter.add_unit(UnitDescriptor {
                index: UnitId::new(index),
                title: format!("unit-{index}"),
                running: false,
                host_pid: None,
            });
        }
        adapter
    }

    pub fn add_unit(&self, unit: UnitDescriptor) {
        self.inner.lock().units.push(unit);
    }

    /// Make every subsequent `list` call fail with the given message.
    pub fn set_failure(&self, message: impl Into<String>) {
        self.inner.lock().failure = Some(message.into());
    }

    pub fn list_calls(&self) -> usize {
        self.inner.lock().list_calls
    }
}

#[async_trait]
impl InventoryAdapter for FakeInventoryAdapter {
    async fn list(&self) -> Result<Vec<UnitDescriptor>, InventoryError> {
        let mut inner = self.inner.lock();
        inner.list_calls += 1;
        match &inner.failure {
            Some(message) => Err(InventoryError::CommandFailed(message.clone())),
            None => Ok(inner.units.clone()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
