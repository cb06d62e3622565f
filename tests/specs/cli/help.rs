//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn drover_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn drover_help_shows_usage_and_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("units");
}

#[test]
fn drover_run_help_shows_usage() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--pool");
}

#[test]
fn drover_units_help_shows_usage() {
    cli()
        .args(&["units", "--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--running");
}

#[test]
fn drover_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
