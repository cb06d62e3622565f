// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console-backed inventory adapter.

use super::{InventoryAdapter, InventoryError};
use crate::subprocess::{run_with_timeout, INVENTORY_TIMEOUT};
use async_trait::async_trait;
use drover_core::{UnitDescriptor, UnitId};
use std::path::PathBuf;
use tokio::process::Command;

/// Inventory adapter shelling out to the instance console.
///
/// `<program> listv2` prints one unit per line as
/// `index,title,handle,is_running,pid[,...]`. Trailing columns vary between
/// console versions and are ignored.
#[derive(Clone)]
pub struct ConsoleInventoryAdapter {
    program: PathBuf,
}

impl ConsoleInventoryAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl InventoryAdapter for ConsoleInventoryAdapter {
    async fn list(&self) -> Result<Vec<UnitDescriptor>, InventoryError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("listv2");

        let output = run_with_timeout(cmd, INVENTORY_TIMEOUT, "console listv2")
            .await
            .map_err(InventoryError::CommandFailed)?;

        if !output.status.success() {
            return Err(InventoryError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse the `listv2` output, skipping rows that do not describe a unit.
///
/// A row is kept when it has at least five fields and a numeric index. The
/// running flag is the literal `1`; a pid of `0` (the console's value for a
/// stopped unit) or an unparseable pid becomes `None`.
pub fn parse_listing(raw: &str) -> Vec<UnitDescriptor> {
    let mut units = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(unit) => units.push(unit),
            None => {
                tracing::warn!(line, "skipping malformed inventory row");
            }
        }
    }
    units
}

fn parse_line(line: &str) -> Option<UnitDescriptor> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 5 {
        return None;
    }

    let index: UnitId = fields[0].parse().ok()?;
    let running = fields[3].trim() == "1";
    let host_pid = fields[4]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&pid| pid != 0);

    Some(UnitDescriptor {
        index,
        title: fields[1].trim().to_string(),
        running,
        host_pid,
    })
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
