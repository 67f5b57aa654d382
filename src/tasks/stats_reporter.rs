//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::FactorCache;

/// Spawns a background task that periodically logs cache statistics.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reports. It only reads the lock-free counters, so it never
/// delays a request.
///
/// # Arguments
/// * `cache` - shared reference to the factor cache
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(FactorCache::new());
/// let reporter = spawn_stats_reporter(cache.clone(), 60);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter(cache: Arc<FactorCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval_secs
        );

        let mut last_attempts = cache.attempts();

        loop {
            tokio::time::sleep(interval).await;

            let snapshot = cache.stats().snapshot();
            if snapshot.attempts != last_attempts {
                info!(
                    attempts = snapshot.attempts,
                    hits = snapshot.hits,
                    misses = snapshot.misses,
                    failures = snapshot.failures,
                    hit_ratio = snapshot.hit_ratio,
                    "cache stats"
                );
                last_attempts = snapshot.attempts;
            } else {
                debug!("cache stats: no activity since last report");
            }
        }
    })
}
