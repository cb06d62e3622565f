// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-unit job supervision.
//!
//! One supervisor drives one unit through boot, worker execution, and
//! shutdown, and reports a terminal [`JobOutcome`]. Nothing here is retried;
//! a failed or timed-out unit is reported and left for a future run.

use drover_adapters::{LifecycleAdapter, WorkerAdapter, WorkerHandle};
use drover_core::{format_elapsed, FaultKind, JobOutcome, SchedulerConfig, UnitId, UnitReport};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Fixed waits of the supervisor state machine.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorTimings {
    /// Unconditional wait after the start command for the hosted environment
    /// to finish its own boot. Not a poll; there is no readiness signal.
    pub boot_settle: Duration,
    /// Wall-clock deadline for the worker run.
    pub worker_deadline: Duration,
    /// Pause after the slot is released, spacing out disk-heavy start/stop
    /// cycles.
    pub cooldown: Duration,
}

impl SupervisorTimings {
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            boot_settle: config.boot_settle,
            worker_deadline: config.worker_deadline,
            cooldown: config.cooldown,
        }
    }
}

/// States a supervised unit walks through, for transition logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupervisorState {
    Booting,
    Running,
    ShuttingDown,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorState::Booting => write!(f, "booting"),
            SupervisorState::Running => write!(f, "running"),
            SupervisorState::ShuttingDown => write!(f, "shutting down"),
        }
    }
}

/// Supervisor for one unit at a time.
///
/// Owned by a single loop; no state is shared between supervisors.
pub struct JobSupervisor<L, W> {
    lifecycle: L,
    workers: W,
    timings: SupervisorTimings,
    cancel: CancellationToken,
}

impl<L, W> JobSupervisor<L, W>
where
    L: LifecycleAdapter,
    W: WorkerAdapter,
{
    pub fn new(lifecycle: L, workers: W, timings: SupervisorTimings, cancel: CancellationToken) -> Self {
        Self {
            lifecycle,
            workers,
            timings,
            cancel,
        }
    }

    /// Drive one unit end-to-end: boot, execute, shut down.
    ///
    /// The stop command is issued unconditionally; a timed-out or failed
    /// run still has a live unit hogging memory until it is reclaimed.
    pub async fn run_unit(&self, unit: UnitId) -> UnitReport {
        let started = Instant::now();

        self.transition(unit, SupervisorState::Booting);
        if let Err(err) = self.lifecycle.start(unit).await {
            // Optimistic: the unit may already be running and the start
            // merely re-reported it. The worker will find out either way.
            tracing::warn!(unit = %unit, %err, "start command failed, continuing");
        }

        let outcome = if self.settle().await {
            self.execute(unit).await
        } else {
            JobOutcome::failed("run cancelled", FaultKind::Recoverable)
        };

        self.transition(unit, SupervisorState::ShuttingDown);
        if let Err(err) = self.lifecycle.stop(unit).await {
            tracing::warn!(unit = %unit, %err, "stop command failed");
        }

        let elapsed = started.elapsed();
        match &outcome {
            JobOutcome::Completed => {
                tracing::info!(unit = %unit, elapsed = %format_elapsed(elapsed), "unit completed");
            }
            JobOutcome::TimedOut => {
                tracing::warn!(unit = %unit, elapsed = %format_elapsed(elapsed), "unit timed out");
            }
            JobOutcome::Failed { reason, kind } => {
                tracing::error!(unit = %unit, %reason, %kind, "unit failed");
            }
        }

        UnitReport {
            unit,
            outcome,
            elapsed,
        }
    }

    /// Post-release cool-down before the loop dequeues its next item.
    pub async fn cooldown(&self) {
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep(self.timings.cooldown) => {}
        }
    }

    /// Boot-settle wait; `false` when cancelled first.
    async fn settle(&self) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(self.timings.boot_settle) => true,
        }
    }

    /// Spawn the worker and race its exit against the deadline.
    async fn execute(&self, unit: UnitId) -> JobOutcome {
        let mut handle = match self.workers.spawn(unit).await {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!(unit = %unit, %err, "worker spawn failed");
                return JobOutcome::failed(
                    format!("spawn failure: {err}"),
                    FaultKind::FatalToUnit,
                );
            }
        };

        self.transition(unit, SupervisorState::Running);
        tokio::select! {
            exited = handle.wait() => match exited {
                Ok(exit) => {
                    if !exit.success() {
                        tracing::warn!(unit = %unit, code = ?exit.code, "worker exited nonzero");
                    }
                    JobOutcome::Completed
                }
                Err(err) => {
                    // The monitoring call itself broke; make sure nothing
                    // lingers before reporting the fault.
                    tracing::error!(unit = %unit, %err, "worker wait failed");
                    let _ = handle.kill_tree().await;
                    JobOutcome::failed(err.to_string(), FaultKind::FatalToUnit)
                }
            },
            _ = tokio::time::sleep(self.timings.worker_deadline) => {
                tracing::warn!(
                    unit = %unit,
                    deadline = %format_elapsed(self.timings.worker_deadline),
                    "worker deadline elapsed, terminating"
                );
                let _ = handle.kill_tree().await;
                JobOutcome::TimedOut
            }
            _ = self.cancel.cancelled() => {
                let _ = handle.kill_tree().await;
                JobOutcome::failed("run cancelled", FaultKind::Recoverable)
            }
        }
    }

    fn transition(&self, unit: UnitId, state: SupervisorState) {
        tracing::info!(unit = %unit, state = %state, "state transition");
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
