// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeMap;
use std::sync::Arc;

#[test]
fn pop_on_empty_returns_none() {
    let queue = WorkQueue::new();
    assert!(queue.try_pop().is_none());
    assert!(queue.is_empty());
}

#[test]
fn fifo_order_preserved() {
    let queue = WorkQueue::new();
    for i in 0..5 {
        queue.push(UnitId::new(i));
    }
    assert_eq!(queue.len(), 5);
    for i in 0..5 {
        assert_eq!(queue.try_pop(), Some(UnitId::new(i)));
    }
    assert!(queue.try_pop().is_none());
}

#[test]
fn concurrent_consumers_see_each_item_exactly_once() {
    const ITEMS: u32 = 1000;
    const CONSUMERS: usize = 8;

    let queue = Arc::new(WorkQueue::new());
    for i in 0..ITEMS {
        queue.push(UnitId::new(i));
    }

    let handles: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                let mut seen = Vec::new();
                while let Some(unit) = queue.try_pop() {
                    seen.push(unit);
                }
                seen
            })
        })
        .collect();

    let mut counts: BTreeMap<UnitId, usize> = BTreeMap::new();
    for handle in handles {
        for unit in handle.join().unwrap() {
            *counts.entry(unit).or_default() += 1;
        }
    }

    // Every item dequeued exactly once, nothing lost, nothing duplicated.
    assert_eq!(counts.len() as u32, ITEMS);
    assert!(counts.values().all(|&n| n == 1));
    assert!(queue.is_empty());
}

#[test]
fn producers_and_consumers_interleave() {
    const PER_PRODUCER: u32 = 200;
    const PRODUCERS: u32 = 4;

    let queue = Arc::new(WorkQueue::new());

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.push(UnitId::new(p * PER_PRODUCER + i));
                }
            })
        })
        .collect();

    let consumer = {
        let queue = Arc::clone(&queue);
        std::thread::spawn(move || {
            let mut taken = 0u32;
            while taken < PRODUCERS * PER_PRODUCER {
                if queue.try_pop().is_some() {
                    taken += 1;
                } else {
                    std::thread::yield_now();
                }
            }
            taken
        })
    };

    for p in producers {
        p.join().unwrap();
    }
    assert_eq!(consumer.join().unwrap(), PRODUCERS * PER_PRODUCER);
    assert!(queue.is_empty());
}
