// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load-based admission gate.

use crate::load::LoadSampler;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Soft global admission control, independent of the hard slot ceiling.
///
/// A supervisor loop consults the gate before reaching for a slot: while the
/// CPU is above threshold the loop backs off and re-polls, holding onto its
/// work item the whole time. Slots already held by in-flight units are never
/// touched; the gate only delays new admissions.
#[derive(Clone)]
pub struct AdmissionGate<S> {
    sampler: S,
    threshold_percent: f32,
    backoff: Duration,
}

impl<S: LoadSampler> AdmissionGate<S> {
    pub fn new(sampler: S, threshold_percent: f32, backoff: Duration) -> Self {
        Self {
            sampler,
            threshold_percent,
            backoff,
        }
    }

    /// One poll: is the system currently too loaded to admit new work?
    ///
    /// A failed sample admits: a broken counter must not wedge the run when
    /// the slot pool still bounds parallelism.
    pub async fn is_overloaded(&self) -> bool {
        match self.sampler.cpu_percent().await {
            Ok(cpu) => {
                if cpu > self.threshold_percent {
                    tracing::info!(
                        cpu,
                        threshold = self.threshold_percent,
                        "admission withheld, cpu over threshold"
                    );
                    true
                } else {
                    false
                }
            }
            Err(err) => {
                tracing::warn!(%err, "cpu sample failed, admitting");
                false
            }
        }
    }

    /// Poll until the system is below threshold, backing off between polls.
    ///
    /// Returns `false` when cancelled before admission.
    pub async fn wait_until_admitted(&self, cancel: &CancellationToken) -> bool {
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            if !self.is_overloaded().await {
                return true;
            }
            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = tokio::time::sleep(self.backoff) => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
