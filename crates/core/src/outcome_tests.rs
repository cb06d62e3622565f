// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

fn report(index: u32, outcome: JobOutcome) -> UnitReport {
    UnitReport {
        unit: UnitId::new(index),
        outcome,
        elapsed: Duration::from_secs(1),
    }
}

#[test]
fn empty_summary_is_healthy() {
    let summary = RunSummary::new();
    assert_eq!(summary.total(), 0);
    assert!(summary.is_healthy());
}

#[test]
fn counts_split_by_outcome() {
    let mut summary = RunSummary::new();
    summary.record(report(1, JobOutcome::Completed));
    summary.record(report(2, JobOutcome::TimedOut));
    summary.record(report(
        3,
        JobOutcome::failed("spawn failure", FaultKind::FatalToUnit),
    ));
    summary.record(report(4, JobOutcome::Completed));

    assert_eq!(summary.completed(), 2);
    assert_eq!(summary.timed_out(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.total(), 4);
}

#[test]
fn timeouts_alone_do_not_fail_the_run() {
    let mut summary = RunSummary::new();
    summary.record(report(1, JobOutcome::TimedOut));
    assert!(summary.is_healthy());

    summary.record(report(2, JobOutcome::failed("boom", FaultKind::Recoverable)));
    assert!(!summary.is_healthy());
}

#[test]
fn merge_concatenates_reports() {
    let mut left = RunSummary::new();
    left.record(report(1, JobOutcome::Completed));

    let mut right = RunSummary::new();
    right.record(report(2, JobOutcome::TimedOut));

    left.merge(right);
    assert_eq!(left.total(), 2);
    assert_eq!(left.timed_out(), 1);
}

#[test]
fn outcome_display_carries_the_reason() {
    let outcome = JobOutcome::failed("run cancelled", FaultKind::Recoverable);
    assert_eq!(outcome.to_string(), "failed: run cancelled");
    assert_eq!(JobOutcome::TimedOut.to_string(), "timed out");
}
