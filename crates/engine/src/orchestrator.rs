// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator root: discovery, queue population, and the supervisor loops.

use crate::error::EngineError;
use crate::gate::AdmissionGate;
use crate::load::LoadSampler;
use crate::slots::SlotPool;
use crate::supervisor::{JobSupervisor, SupervisorTimings};
use drover_adapters::{InventoryAdapter, LifecycleAdapter, WorkerAdapter};
use drover_core::{RunSummary, SchedulerConfig, UnitReport, WorkQueue};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The adapters one orchestrator drives.
pub struct EngineDeps<I, L, W, S> {
    pub inventory: I,
    pub lifecycle: L,
    pub workers: W,
    pub sampler: S,
}

/// One discovery-and-drain pass over the unit inventory.
///
/// Everything the loops share (the queue, the slot pool, the gate) is
/// constructed here and handed to each loop explicitly, so independent
/// orchestrators (tests run several) never interfere with each other.
pub struct Orchestrator<I, L, W, S> {
    inventory: I,
    lifecycle: L,
    workers: W,
    gate: AdmissionGate<S>,
    slots: SlotPool,
    queue: Arc<WorkQueue>,
    timings: SupervisorTimings,
    cancel: CancellationToken,
}

impl<I, L, W, S> Orchestrator<I, L, W, S>
where
    I: InventoryAdapter,
    L: LifecycleAdapter,
    W: WorkerAdapter,
    S: LoadSampler,
{
    pub fn new(deps: EngineDeps<I, L, W, S>, config: &SchedulerConfig, cancel: CancellationToken) -> Self {
        Self {
            inventory: deps.inventory,
            lifecycle: deps.lifecycle,
            workers: deps.workers,
            gate: AdmissionGate::new(
                deps.sampler,
                config.cpu_threshold_percent,
                config.throttle_backoff,
            ),
            slots: SlotPool::new(config.pool_size),
            queue: Arc::new(WorkQueue::new()),
            timings: SupervisorTimings::from_config(config),
            cancel,
        }
    }

    /// Units still waiting in the queue (populated after a cancelled run).
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one full pass: discover, enqueue, drain.
    ///
    /// Returns after every admitted unit has a terminal outcome or the run
    /// was cancelled. Only discovery failure aborts the pass; unit-scoped
    /// errors are contained in their reports.
    pub async fn run(&self) -> Result<RunSummary, EngineError> {
        let run_id = Uuid::new_v4();
        let units = self.inventory.list().await?;

        let discovered = units.len();
        for unit in units {
            if !unit.is_admissible() {
                tracing::warn!(unit = %unit.index, "excluding unit with empty title");
                continue;
            }
            if unit.running {
                tracing::debug!(
                    unit = %unit.index,
                    pid = ?unit.host_pid,
                    "unit already running at discovery"
                );
            }
            self.queue.push(unit.index);
        }

        tracing::info!(
            run_id = %run_id,
            discovered,
            admitted = self.queue.len(),
            slots = self.slots.capacity(),
            "inventory queued"
        );

        if self.queue.is_empty() {
            return Ok(RunSummary::new());
        }

        let mut loops = JoinSet::new();
        for loop_id in 0..self.slots.capacity() {
            let ctx = LoopCtx {
                lifecycle: self.lifecycle.clone(),
                workers: self.workers.clone(),
                gate: self.gate.clone(),
                slots: self.slots.clone(),
                queue: Arc::clone(&self.queue),
                timings: self.timings,
                cancel: self.cancel.clone(),
            };
            loops.spawn(supervisor_loop(loop_id, ctx));
        }

        let mut summary = RunSummary::new();
        while let Some(joined) = loops.join_next().await {
            match joined {
                Ok(reports) => {
                    for report in reports {
                        summary.record(report);
                    }
                }
                Err(err) => {
                    // A torn-down loop must not take the drain with it; the
                    // other loops keep consuming the queue.
                    tracing::error!(%err, "supervisor loop aborted");
                }
            }
        }

        tracing::info!(
            run_id = %run_id,
            completed = summary.completed(),
            timed_out = summary.timed_out(),
            failed = summary.failed(),
            pending = self.queue.len(),
            "run drained"
        );
        Ok(summary)
    }
}

/// Everything one supervisor loop needs, cloned per loop.
struct LoopCtx<L, W, S> {
    lifecycle: L,
    workers: W,
    gate: AdmissionGate<S>,
    slots: SlotPool,
    queue: Arc<WorkQueue>,
    timings: SupervisorTimings,
    cancel: CancellationToken,
}

/// One worker-pool loop: pull, gate, acquire, supervise, release, repeat.
async fn supervisor_loop<L, W, S>(loop_id: usize, ctx: LoopCtx<L, W, S>) -> Vec<UnitReport>
where
    L: LifecycleAdapter,
    W: WorkerAdapter,
    S: LoadSampler,
{
    let supervisor = JobSupervisor::new(
        ctx.lifecycle,
        ctx.workers,
        ctx.timings,
        ctx.cancel.clone(),
    );
    let mut reports = Vec::new();

    loop {
        if ctx.cancel.is_cancelled() {
            break;
        }
        let Some(unit) = ctx.queue.try_pop() else {
            break;
        };

        // Gate before the slot: overload throttling is global and applies
        // even when slots are free. Cancellation mid-wait puts the item back
        // so nothing is silently dropped.
        if !ctx.gate.wait_until_admitted(&ctx.cancel).await {
            ctx.queue.push(unit);
            break;
        }
        let Some(permit) = ctx.slots.acquire(&ctx.cancel).await else {
            ctx.queue.push(unit);
            break;
        };

        let report = supervisor.run_unit(unit).await;
        reports.push(report);

        // Slot free first, then the cool-down; a waiting loop can boot its
        // unit while this one sits out the I/O spacing.
        drop(permit);
        supervisor.cooldown().await;
    }

    tracing::debug!(loop_id, handled = reports.len(), "supervisor loop exited");
    reports
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
