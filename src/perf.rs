//! Counters for the variable-length scan drivers, compiled in with the `perf-counters` feature.
//!
//! Every driver call bumps a few relaxed atomics. That is cheap but not free, so keep the
//! feature for profiling builds such as `swar_bench --stats`.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

const BUCKETS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub calls: u64,
    pub words: u64,
    pub short_calls: u64,
    pub buckets: [u64; BUCKETS],
}

const ZERO: AtomicU64 = AtomicU64::new(0);

static SCAN_CALLS: AtomicU64 = AtomicU64::new(0);
static SCAN_WORDS: AtomicU64 = AtomicU64::new(0);
static SCAN_SHORT: AtomicU64 = AtomicU64::new(0);
static SCAN_BUCKETS: [AtomicU64; BUCKETS] = [ZERO; BUCKETS];

#[inline]
fn bucket_index(len: usize) -> usize {
    match len {
        0..=7 => 0,
        8..=16 => 1,
        17..=32 => 2,
        33..=64 => 3,
        65..=128 => 4,
        129..=256 => 5,
        257..=512 => 6,
        _ => 7,
    }
}

/// Record one driver call over `len` bytes.
#[inline]
pub fn record_scan(len: usize) {
    SCAN_CALLS.fetch_add(1, Ordering::Relaxed);
    if len < 8 {
        SCAN_SHORT.fetch_add(1, Ordering::Relaxed);
    }
    SCAN_BUCKETS[bucket_index(len)].fetch_add(1, Ordering::Relaxed);
}

/// Record one word inspected by a driver loop.
#[inline]
pub fn record_word() {
    SCAN_WORDS.fetch_add(1, Ordering::Relaxed);
}

pub fn reset() {
    SCAN_CALLS.store(0, Ordering::Relaxed);
    SCAN_WORDS.store(0, Ordering::Relaxed);
    SCAN_SHORT.store(0, Ordering::Relaxed);
    for bucket in &SCAN_BUCKETS {
        bucket.store(0, Ordering::Relaxed);
    }
}

pub fn snapshot() -> ScanStats {
    let mut buckets = [0u64; BUCKETS];
    for (idx, bucket) in SCAN_BUCKETS.iter().enumerate() {
        buckets[idx] = bucket.load(Ordering::Relaxed);
    }
    ScanStats {
        calls: SCAN_CALLS.load(Ordering::Relaxed),
        words: SCAN_WORDS.load(Ordering::Relaxed),
        short_calls: SCAN_SHORT.load(Ordering::Relaxed),
        buckets,
    }
}

/// Emit the current counters at `info` level.
pub fn log_summary() {
    let stats = snapshot();
    info!(
        "scan drivers: {} calls ({} under one word), {} words inspected, length buckets {:?}",
        stats.calls, stats.short_calls, stats.words, stats.buckets
    );
}
