// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake worker adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WorkerAdapter, WorkerError, WorkerExit, WorkerHandle};
use async_trait::async_trait;
use drover_core::UnitId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Scripted behavior of a fake worker.
#[derive(Debug, Clone)]
pub enum WorkerScript {
    /// Exit on its own after `delay` with the given code.
    ExitAfter { delay: Duration, code: i32 },
    /// Hang until killed.
    NeverExit,
    /// Refuse to spawn.
    FailSpawn { message: String },
    /// Spawn, then error out of the wait itself (monitoring fault).
    WaitFault { message: String },
}

impl WorkerScript {
    /// A worker that exits immediately with success.
    pub fn instant() -> Self {
        WorkerScript::ExitAfter {
            delay: Duration::ZERO,
            code: 0,
        }
    }
}

struct FakeWorkerState {
    scripts: HashMap<UnitId, WorkerScript>,
    default_script: WorkerScript,
    spawns: Vec<UnitId>,
    kills: Vec<UnitId>,
    active: usize,
    max_active: usize,
}

/// Fake worker adapter for testing.
///
/// Tracks every spawn and kill, plus a high-water mark of simultaneously
/// active workers, the observable for concurrency-ceiling assertions.
#[derive(Clone)]
pub struct FakeWorkerAdapter {
    inner: Arc<Mutex<FakeWorkerState>>,
}

impl Default for FakeWorkerAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeWorkerState {
                scripts: HashMap::new(),
                default_script: WorkerScript::instant(),
                spawns: Vec::new(),
                kills: Vec::new(),
                active: 0,
                max_active: 0,
            })),
        }
    }
}

impl FakeWorkerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behavior of one unit's worker.
    pub fn set_script(&self, unit: UnitId, script: WorkerScript) {
        self.inner.lock().scripts.insert(unit, script);
    }

    /// Script the behavior of every unit without an explicit script.
    pub fn set_default_script(&self, script: WorkerScript) {
        self.inner.lock().default_script = script;
    }

    /// Units spawned, in spawn order.
    pub fn spawns(&self) -> Vec<UnitId> {
        self.inner.lock().spawns.clone()
    }

    /// Units whose worker was forcibly terminated, in kill order.
    pub fn kills(&self) -> Vec<UnitId> {
        self.inner.lock().kills.clone()
    }

    pub fn kills_for(&self, unit: UnitId) -> usize {
        self.inner.lock().kills.iter().filter(|u| **u == unit).count()
    }

    /// Highest number of simultaneously active workers observed.
    pub fn max_active(&self) -> usize {
        self.inner.lock().max_active
    }

    pub fn active(&self) -> usize {
        self.inner.lock().active
    }
}

#[async_trait]
impl WorkerAdapter for FakeWorkerAdapter {
    type Handle = FakeWorkerHandle;

    async fn spawn(&self, unit: UnitId) -> Result<Self::Handle, WorkerError> {
        let mut inner = self.inner.lock();
        let script = inner
            .scripts
            .get(&unit)
            .unwrap_or(&inner.default_script)
            .clone();

        if let WorkerScript::FailSpawn { message } = &script {
            return Err(WorkerError::Spawn {
                unit,
                message: message.clone(),
            });
        }

        inner.spawns.push(unit);
        inner.active += 1;
        inner.max_active = inner.max_active.max(inner.active);

        Ok(FakeWorkerHandle {
            inner: Arc::clone(&self.inner),
            unit,
            script,
            done: false,
        })
    }
}

/// Handle over one scripted fake worker.
pub struct FakeWorkerHandle {
    inner: Arc<Mutex<FakeWorkerState>>,
    unit: UnitId,
    script: WorkerScript,
    done: bool,
}

impl FakeWorkerHandle {
    fn retire(&mut self) {
        if !self.done {
            self.done = true;
            self.inner.lock().active -= 1;
        }
    }
}

#[async_trait]
impl WorkerHandle for FakeWorkerHandle {
    async fn wait(&mut self) -> Result<WorkerExit, WorkerError> {
        match self.script.clone() {
            WorkerScript::ExitAfter { delay, code } => {
                tokio::time::sleep(delay).await;
                self.retire();
                Ok(WorkerExit { code: Some(code) })
            }
            WorkerScript::NeverExit => std::future::pending().await,
            WorkerScript::WaitFault { message } => {
                self.retire();
                Err(WorkerError::Wait {
                    unit: self.unit,
                    message,
                })
            }
            // Spawn already failed; there is no handle to wait on.
            WorkerScript::FailSpawn { message } => Err(WorkerError::Spawn {
                unit: self.unit,
                message,
            }),
        }
    }

    async fn kill_tree(&mut self) -> Result<(), WorkerError> {
        self.inner.lock().kills.push(self.unit);
        self.retire();
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
