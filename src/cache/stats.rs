//! Cache Statistics Module
//!
//! Tracks memoizing cache performance: attempts, hits, misses and compute failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Lock-free cache counters.
///
/// Every counter is updated with an indivisible `fetch_add`. Counters are
/// independent of the cache slot, and a reader combining several of them may
/// see values taken at slightly different instants.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of `get_or_compute` calls
    attempts: AtomicU64,
    /// Number of calls answered from the cached entry
    hits: AtomicU64,
    /// Number of calls that had to run the computation
    misses: AtomicU64,
    /// Number of misses whose computation returned an error
    failures: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    // Hits and misses are released after the attempt they belong to, so a
    // reader that acquires them and then loads `attempts` never sees fewer
    // attempts than hits + misses.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Acquire)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Acquire)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    // == Hit Ratio ==
    /// Calculates the cache hit ratio.
    ///
    /// Returns hits / attempts, or 0.0 if no attempts have been made.
    pub fn hit_ratio(&self) -> f64 {
        hit_ratio(self.hits(), self.attempts())
    }

    // == Snapshot ==
    /// Copies the current counter values into a plain, serializable value.
    ///
    /// `attempts` is bumped before `hits`/`misses` on every call, so it is
    /// read last to keep `hits + misses <= attempts` in the snapshot.
    pub fn snapshot(&self) -> StatsSnapshot {
        let hits = self.hits();
        let misses = self.misses();
        let failures = self.failures();
        let attempts = self.attempts();
        StatsSnapshot {
            attempts,
            hits,
            misses,
            failures,
            hit_ratio: hit_ratio(hits, attempts),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
    pub hit_ratio: f64,
}

fn hit_ratio(hits: u64, attempts: u64) -> f64 {
    if attempts == 0 {
        0.0
    } else {
        hits as f64 / attempts as f64
    }
}
