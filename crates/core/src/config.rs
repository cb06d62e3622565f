// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator configuration.
//!
//! Loaded from a TOML file (`drover.toml` by default); every field has a
//! default matching the constants the scheduler was tuned with, so an empty
//! file, or no file at all, yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "DROVER_CONFIG";

/// File name probed in the working directory as the last resort.
pub const CONFIG_FILE: &str = "drover.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

/// Scheduling knobs: slot pool size, load throttling, and the fixed waits
/// of the supervisor state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Hard ceiling on simultaneously running units.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Global CPU percentage above which no new unit is admitted.
    #[serde(default = "default_cpu_threshold")]
    pub cpu_threshold_percent: f32,

    /// Sleep between admission re-polls while the CPU is above threshold.
    #[serde(default = "default_throttle_backoff", with = "duration_str")]
    pub throttle_backoff: Duration,

    /// Unconditional wait after a unit's start command, covering the hosted
    /// environment's own boot. There is no readiness signal to poll.
    #[serde(default = "default_boot_settle", with = "duration_str")]
    pub boot_settle: Duration,

    /// Wall-clock deadline for one worker run; past it the worker's process
    /// group is killed.
    #[serde(default = "default_worker_deadline", with = "duration_str")]
    pub worker_deadline: Duration,

    /// Pause after releasing a slot, throttling burst I/O from back-to-back
    /// start/stop cycles.
    #[serde(default = "default_cooldown", with = "duration_str")]
    pub cooldown: Duration,
}

fn default_pool_size() -> usize {
    15
}

fn default_cpu_threshold() -> f32 {
    90.0
}

fn default_throttle_backoff() -> Duration {
    Duration::from_secs(10)
}

fn default_boot_settle() -> Duration {
    Duration::from_secs(20)
}

fn default_worker_deadline() -> Duration {
    Duration::from_secs(600)
}

fn default_cooldown() -> Duration {
    Duration::from_secs(2)
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            cpu_threshold_percent: default_cpu_threshold(),
            throttle_backoff: default_throttle_backoff(),
            boot_settle: default_boot_settle(),
            worker_deadline: default_worker_deadline(),
            cooldown: default_cooldown(),
        }
    }
}

/// The instance console: the external binary that lists, starts, and stops
/// units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    #[serde(default = "default_console_program")]
    pub program: PathBuf,
}

fn default_console_program() -> PathBuf {
    PathBuf::from("memuc")
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            program: default_console_program(),
        }
    }
}

/// The one-shot worker binary spawned per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerConfig {
    #[serde(default = "default_worker_program")]
    pub program: PathBuf,
}

fn default_worker_program() -> PathBuf {
    PathBuf::from("drover-worker")
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            program: default_worker_program(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config: explicit flag, then `DROVER_CONFIG`,
    /// then `./drover.toml` if present, then built-in defaults.
    pub fn resolve(flag: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = flag {
            return Self::load(path);
        }
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&env_path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.pool_size == 0 {
            return Err(ConfigError::Invalid(
                "scheduler.pool_size must be at least 1".to_string(),
            ));
        }
        let threshold = self.scheduler.cpu_threshold_percent;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "scheduler.cpu_threshold_percent must be within 0-100, got {}",
                threshold
            )));
        }
        Ok(())
    }
}

/// Serde bridge storing durations as humane strings ("20s", "10m").
mod duration_str {
    use crate::time_fmt::parse_duration;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        let millis = d.as_millis();
        if millis % 1000 == 0 {
            ser.serialize_str(&format!("{}s", d.as_secs()))
        } else {
            ser.serialize_str(&format!("{}ms", millis))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(de)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
