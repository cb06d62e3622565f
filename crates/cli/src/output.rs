// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing stdout rendering.

use drover_core::{format_elapsed, RunSummary, UnitDescriptor};

/// Render the inventory listing.
pub fn render_units(units: &[UnitDescriptor]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<7} {:<24} {:<9} {}\n",
        "INDEX", "TITLE", "STATE", "PID"
    ));
    for unit in units {
        let state = if unit.running { "running" } else { "stopped" };
        let pid = unit
            .host_pid
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<7} {:<24} {:<9} {}\n",
            unit.index, unit.title, state, pid
        ));
    }
    out.push_str(&format!("{} unit(s)\n", units.len()));
    out
}

/// Render the end-of-run summary.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "run finished: {} completed, {} timed out, {} failed ({} total)\n",
        summary.completed(),
        summary.timed_out(),
        summary.failed(),
        summary.total()
    ));
    for report in &summary.reports {
        out.push_str(&format!(
            "  unit {:<5} {:<10} {}\n",
            report.unit,
            format_elapsed(report.elapsed),
            report.outcome
        ));
    }
    out
}

pub fn print_units(units: &[UnitDescriptor]) {
    print!("{}", render_units(units));
}

pub fn print_summary(summary: &RunSummary) {
    print!("{}", render_summary(summary));
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
