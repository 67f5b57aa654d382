//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::PublishPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between cache statistics reports
    pub stats_interval: u64,
    /// How racing cache misses publish their results
    pub publish_policy: PublishPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats report frequency in seconds (default: 60)
    /// - `PUBLISH_POLICY` - `overwrite` or `if-unchanged` (default: overwrite)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            stats_interval: env::var("STATS_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.stats_interval),
            publish_policy: env::var("PUBLISH_POLICY")
                .ok()
                .and_then(|v| PublishPolicy::parse(&v))
                .unwrap_or(defaults.publish_policy),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            stats_interval: 60,
            publish_policy: PublishPolicy::Overwrite,
        }
    }
}
