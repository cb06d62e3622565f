// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution unit identifier and descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Stable numeric identifier of one execution unit.
///
/// The console assigns indexes at unit creation time and keeps them stable
/// across start/stop cycles, so the index is the only handle the orchestrator
/// holds onto. Everything else in a [`UnitDescriptor`] may go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so width/alignment flags reach the inner integer.
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for UnitId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl FromStr for UnitId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

/// One execution unit as reported by the inventory console.
///
/// A descriptor is a point-in-time observation: `running` and `host_pid`
/// describe the unit at discovery time and are invalidated by any start or
/// stop command issued afterwards. `host_pid` is `None` when the unit is
/// stopped or the console did not report a parseable pid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub index: UnitId,
    pub title: String,
    pub running: bool,
    pub host_pid: Option<u32>,
}

impl UnitDescriptor {
    /// A descriptor is admissible when its title is non-empty.
    ///
    /// The console emits placeholder rows for half-created units; an empty
    /// title marks one of those and the unit is excluded from scheduling.
    pub fn is_admissible(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit {} ({})", self.index, self.title)
    }
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
