//! Response DTOs for the factor service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{PublishPolicy, StatsSnapshot};

/// Response body for GET /factor/:number and POST /factor
#[derive(Debug, Clone, Serialize)]
pub struct FactorResponse {
    /// The number that was factored
    pub number: u64,
    /// Prime factors in ascending order
    pub factors: Vec<u64>,
    /// Whether the answer came from the cache
    pub cached: bool,
}

impl FactorResponse {
    pub fn new(number: u64, factors: Vec<u64>, cached: bool) -> Self {
        Self {
            number,
            factors,
            cached,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache lookups
    pub attempts: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the factorization
    pub misses: u64,
    /// Factorizations that failed
    pub failures: u64,
    /// hits / attempts
    pub hit_ratio: f64,
    /// Factor requests received, including ones rejected before the cache
    pub requests: u64,
    /// Number currently held in the cache
    pub cached_number: Option<u64>,
    /// Publish policy the cache runs with
    pub policy: PublishPolicy,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a cache statistics snapshot
    pub fn new(
        snapshot: StatsSnapshot,
        requests: u64,
        cached_number: Option<u64>,
        policy: PublishPolicy,
    ) -> Self {
        Self {
            attempts: snapshot.attempts,
            hits: snapshot.hits,
            misses: snapshot.misses,
            failures: snapshot.failures,
            hit_ratio: snapshot.hit_ratio,
            requests,
            cached_number,
            policy,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
