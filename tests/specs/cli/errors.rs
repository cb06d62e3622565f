//! CLI error-path specs
//!
//! Config resolution failures and unreachable consoles.

use crate::prelude::*;

#[test]
fn missing_config_file_fails() {
    cli()
        .args(&["units", "--config", "/nonexistent/drover.toml"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn malformed_config_fails_with_the_path() {
    let fixture = Fixture::new();
    let config = fixture.file("drover.toml", "[scheduler]\npool_size = \"many\"\n");

    cli()
        .args(&["units", "--config", config.to_str().unwrap()])
        .fails()
        .stderr_has("failed to parse config");
}

#[test]
fn invalid_pool_size_fails_validation() {
    let fixture = Fixture::new();
    let config = fixture.file("drover.toml", "[scheduler]\npool_size = 0\n");

    cli()
        .args(&["units", "--config", config.to_str().unwrap()])
        .fails()
        .stderr_has("pool_size");
}

#[test]
fn unreachable_console_is_a_discovery_failure() {
    let fixture = Fixture::new();
    let config = fixture.file(
        "drover.toml",
        "[console]\nprogram = \"/nonexistent/console\"\n",
    );

    cli()
        .args(&["units", "--config", config.to_str().unwrap()])
        .fails()
        .stderr_has("discovery failed");
}

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["wrangle"]).fails();
}
