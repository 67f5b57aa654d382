//! Cache Module
//!
//! Single-slot memoizing cache with lock-free publication and counters.

mod entry;
mod memo;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use memo::{Lookup, MemoizingCache, PublishPolicy, Resolved};
pub use stats::{CacheStats, StatsSnapshot};
