// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global CPU load sampling.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Settle time between the warm-up and live samples. The warm-up sample only
/// establishes a baseline; the utilization is the delta across this window.
const SAMPLE_SETTLE: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cpu sample failed: {0}")]
    Sample(String),
}

/// Samples instantaneous global CPU utilization.
#[async_trait]
pub trait LoadSampler: Clone + Send + Sync + 'static {
    /// Current global CPU utilization in percent (0–100).
    async fn cpu_percent(&self) -> Result<f32, LoadError>;
}

/// Load sampler backed by `/proc/stat` counter deltas.
///
/// Each call takes a warm-up reading, waits out the settle window, reads
/// again, and reports the busy share of the elapsed jiffies. On platforms
/// without `/proc` there is no global counter to sample and the sampler
/// reports 0%; the hard slot ceiling still bounds parallelism there.
#[derive(Clone, Copy, Default)]
pub struct ProcStatSampler;

impl ProcStatSampler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LoadSampler for ProcStatSampler {
    async fn cpu_percent(&self) -> Result<f32, LoadError> {
        #[cfg(target_os = "linux")]
        {
            let first = read_cpu_times()?;
            tokio::time::sleep(SAMPLE_SETTLE).await;
            let second = read_cpu_times()?;
            Ok(percent_between(first, second))
        }
        #[cfg(not(target_os = "linux"))]
        {
            Ok(0.0)
        }
    }
}

/// Aggregate cpu jiffies from one `/proc/stat` reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CpuTimes {
    busy: u64,
    total: u64,
}

#[cfg(target_os = "linux")]
fn read_cpu_times() -> Result<CpuTimes, LoadError> {
    let raw = std::fs::read_to_string("/proc/stat")
        .map_err(|err| LoadError::Sample(err.to_string()))?;
    raw.lines()
        .next()
        .and_then(parse_cpu_line)
        .ok_or_else(|| LoadError::Sample("no aggregate cpu line in /proc/stat".to_string()))
}

/// Parse the aggregate `cpu` line: user nice system idle iowait irq softirq
/// steal [guest guest_nice]. Guest time is already folded into user/nice and
/// is not counted again.
fn parse_cpu_line(line: &str) -> Option<CpuTimes> {
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }
    let values: Vec<u64> = fields.map_while(|f| f.parse().ok()).collect();
    if values.len() < 7 {
        return None;
    }
    let counted = &values[..values.len().min(8)];
    let idle = values[3] + values[4];
    let total: u64 = counted.iter().sum();
    Some(CpuTimes {
        busy: total - idle,
        total,
    })
}

fn percent_between(first: CpuTimes, second: CpuTimes) -> f32 {
    let total_delta = second.total.saturating_sub(first.total);
    if total_delta == 0 {
        return 0.0;
    }
    let busy_delta = second.busy.saturating_sub(first.busy);
    100.0 * busy_delta as f32 / total_delta as f32
}

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::{LoadError, LoadSampler};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    struct FakeLoadState {
        readings: VecDeque<f32>,
        fallback: f32,
        samples: usize,
    }

    /// Scripted load sampler for testing.
    #[derive(Clone)]
    pub struct FakeLoadSampler {
        inner: Arc<Mutex<FakeLoadState>>,
    }

    impl FakeLoadSampler {
        /// Sampler reporting the same value forever.
        pub fn constant(percent: f32) -> Self {
            Self::sequence([], percent)
        }

        /// Sampler consuming `readings` in order, then reporting `fallback`.
        pub fn sequence(readings: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeLoadState {
                    readings: readings.into_iter().collect(),
                    fallback,
                    samples: 0,
                })),
            }
        }

        /// Number of samples taken so far.
        pub fn samples(&self) -> usize {
            self.inner.lock().samples
        }
    }

    #[async_trait]
    impl LoadSampler for FakeLoadSampler {
        async fn cpu_percent(&self) -> Result<f32, LoadError> {
            let mut inner = self.inner.lock();
            inner.samples += 1;
            let value = inner.readings.pop_front().unwrap_or(inner.fallback);
            Ok(value)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLoadSampler;

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
