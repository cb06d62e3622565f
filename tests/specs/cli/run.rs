//! End-to-end run specs against a stub console.
//!
//! The console and worker binaries are tiny shell scripts, so these specs
//! exercise the real discovery → boot → execute → shutdown path.

#![cfg(unix)]

use crate::prelude::*;
use std::path::Path;

const CONSOLE_SCRIPT: &str = r#"case "$1" in
  listv2) printf '0,farm-01,0,0,0\n1,farm-02,0,0,0\n' ;;
  start|stop) exit 0 ;;
  *) exit 1 ;;
esac
"#;

fn write_config(fixture: &Fixture, console: &Path, worker: &Path, deadline: &str) -> std::path::PathBuf {
    fixture.file(
        "drover.toml",
        &format!(
            r#"[scheduler]
pool_size = 2
cpu_threshold_percent = 100.0
throttle_backoff = "1s"
boot_settle = "0s"
worker_deadline = "{deadline}"
cooldown = "0s"

[console]
program = "{}"

[worker]
program = "{}"
"#,
            console.display(),
            worker.display()
        ),
    )
}

#[test]
fn drain_pass_completes_every_unit() {
    let fixture = Fixture::new();
    let console = fixture.script("console.sh", CONSOLE_SCRIPT);
    let worker = fixture.script("worker.sh", "exit 0");
    let config = write_config(&fixture, &console, &worker, "30s");

    cli()
        .args(&["run", "--config", config.to_str().unwrap()])
        .passes()
        .stdout_has("run finished: 2 completed, 0 timed out, 0 failed (2 total)");
}

#[test]
fn units_lists_the_stub_inventory() {
    let fixture = Fixture::new();
    let console = fixture.script("console.sh", CONSOLE_SCRIPT);
    let worker = fixture.script("worker.sh", "exit 0");
    let config = write_config(&fixture, &console, &worker, "30s");

    cli()
        .args(&["units", "--config", config.to_str().unwrap()])
        .passes()
        .stdout_has("farm-01")
        .stdout_has("farm-02")
        .stdout_has("2 unit(s)");
}

#[test]
fn missing_worker_binary_fails_the_run_with_exit_2() {
    let fixture = Fixture::new();
    let console = fixture.script("console.sh", CONSOLE_SCRIPT);
    let config = write_config(
        &fixture,
        &console,
        Path::new("/nonexistent/worker"),
        "30s",
    );

    cli()
        .args(&["run", "--config", config.to_str().unwrap()])
        .fails()
        .exits_with(2)
        .stdout_has("0 completed")
        .stdout_has("2 failed")
        .stdout_has("spawn failure");
}

#[test]
fn stuck_worker_times_out_without_failing_the_run() {
    let fixture = Fixture::new();
    let console = fixture.script("console.sh", CONSOLE_SCRIPT);
    let worker = fixture.script("worker.sh", "sleep 30");
    let config = write_config(&fixture, &console, &worker, "1s");

    cli()
        .args(&["run", "--config", config.to_str().unwrap()])
        .passes()
        .stdout_has("2 timed out")
        .stdout_has("0 failed");
}
