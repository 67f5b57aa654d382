//! Factor Cache - A factorization service with a single-slot memoizing cache
//!
//! Serves prime factorizations over HTTP and caches the most recent result
//! behind one atomically published reference.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod factor;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::MemoizingCache;
pub use config::Config;
pub use tasks::spawn_stats_reporter;
