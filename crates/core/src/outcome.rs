// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal outcomes of one unit's processing attempt.

use crate::unit::UnitId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Classification of a unit-scoped failure.
///
/// `Recoverable` faults are expected to clear on a future run without human
/// action (interface lag, cancelled run); `FatalToUnit` faults need someone
/// to look at the unit before it is worth scheduling again (spawn failure,
/// broken monitoring). Nothing is retried either way; the kind only colors
/// the log line and the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    Recoverable,
    FatalToUnit,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Recoverable => write!(f, "recoverable"),
            FaultKind::FatalToUnit => write!(f, "fatal-to-unit"),
        }
    }
}

/// Terminal result of one supervised run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    /// The worker exited on its own before the deadline.
    Completed,
    /// The deadline elapsed first and the worker was terminated.
    TimedOut,
    /// The unit never produced a worker exit: spawn failure, monitoring
    /// fault, or a cancelled run.
    Failed { reason: String, kind: FaultKind },
}

impl JobOutcome {
    pub fn failed(reason: impl Into<String>, kind: FaultKind) -> Self {
        JobOutcome::Failed {
            reason: reason.into(),
            kind,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobOutcome::Failed { .. })
    }
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Completed => write!(f, "completed"),
            JobOutcome::TimedOut => write!(f, "timed out"),
            JobOutcome::Failed { reason, .. } => write!(f, "failed: {}", reason),
        }
    }
}

/// One unit's report as returned by its supervisor loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReport {
    pub unit: UnitId,
    pub outcome: JobOutcome,
    /// Wall-clock time from slot acquisition to the stop command finishing.
    pub elapsed: Duration,
}

/// Aggregate of all unit reports from one discovery-and-drain pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reports: Vec<UnitReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: UnitReport) {
        self.reports.push(report);
    }

    pub fn merge(&mut self, other: RunSummary) {
        self.reports.extend(other.reports);
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Completed))
    }

    pub fn timed_out(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::TimedOut))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| o.is_failed())
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// A run is healthy when no unit reached `Failed`. Timeouts are surfaced
    /// in the summary but do not fail the run.
    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
