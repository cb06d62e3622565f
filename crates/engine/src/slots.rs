// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed pool of execution slots.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Hard ceiling on simultaneously executing units.
///
/// Capacity is fixed at construction (the hardware budget) and a unit runs
/// only while its loop holds a [`SlotPermit`]. Dropping the permit releases
/// the slot, so release happens on every exit path without bookkeeping.
#[derive(Clone)]
pub struct SlotPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl SlotPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot. Returns `None` when cancelled first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Option<SlotPermit> {
        tokio::select! {
            _ = cancel.cancelled() => None,
            acquired = self.semaphore.clone().acquire_owned() => {
                // Err only on a closed semaphore; this pool never closes it.
                acquired.ok().map(|permit| SlotPermit { _permit: permit })
            }
        }
    }

    /// Take a slot only if one is free right now.
    pub fn try_acquire(&self) -> Option<SlotPermit> {
        self.semaphore
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| SlotPermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }
}

/// RAII permit for one execution slot.
pub struct SlotPermit {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
