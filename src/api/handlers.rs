//! API Handlers
//!
//! HTTP request handlers for each factor service endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::MemoizingCache;
use crate::error::{Result, ServiceError};
use crate::factor::{factorize, parse_number};
use crate::models::{FactorRequest, FactorResponse, HealthResponse, StatsResponse};

/// Cache from a number to its prime factors.
pub type FactorCache = MemoizingCache<u64, Vec<u64>>;

/// Application state shared across all handlers.
///
/// The cache synchronizes itself, so it is shared with a plain `Arc` and no
/// outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Most recent factorization
    pub cache: Arc<FactorCache>,
    /// Factor requests received
    requests: Arc<AtomicU64>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: FactorCache) -> Self {
        Self {
            cache: Arc::new(cache),
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(MemoizingCache::with_policy(config.publish_policy))
    }

    /// Returns the number of factor requests received so far.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Factors `number` through the cache on the blocking thread pool.
    async fn factor(&self, number: u64) -> Result<FactorResponse> {
        let cache = Arc::clone(&self.cache);
        let resolved = tokio::task::spawn_blocking(move || {
            cache.try_resolve(number, |&n| factorize(n))
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("factorization task failed: {e}")))??;

        let cached = resolved.is_hit();
        debug!(number, cached, "factored");
        Ok(FactorResponse::new(number, resolved.value, cached))
    }
}

/// Handler for GET /factor/:number
pub async fn factor_path_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FactorResponse>> {
    state.record_request();
    let number = parse_number(&raw).map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

    Ok(Json(state.factor(number).await?))
}

/// Handler for POST /factor
pub async fn factor_body_handler(
    State(state): State<AppState>,
    Json(req): Json<FactorRequest>,
) -> Result<Json<FactorResponse>> {
    state.record_request();
    let number = req
        .number()
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

    Ok(Json(state.factor(number).await?))
}

/// Handler for GET /stats
///
/// Reads the counters without blocking any in-flight factorization.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = &state.cache;
    Json(StatsResponse::new(
        cache.stats().snapshot(),
        state.requests(),
        cache.cached_key(),
        cache.policy(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MemoizingCache::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumberInput;

    #[tokio::test]
    async fn test_factor_path_handler_miss_then_hit() {
        let state = AppState::default();

        let first = factor_path_handler(State(state.clone()), Path("12".to_string()))
            .await
            .unwrap();
        assert_eq!(first.factors, vec![2, 2, 3]);
        assert!(!first.cached);

        let second = factor_path_handler(State(state.clone()), Path("12".to_string()))
            .await
            .unwrap();
        assert!(second.cached);
        assert_eq!(state.cache.hits(), 1);
        assert_eq!(state.requests(), 2);
    }

    #[tokio::test]
    async fn test_factor_body_handler() {
        let state = AppState::default();
        let req = FactorRequest {
            number: NumberInput::Text("97".to_string()),
        };

        let response = factor_body_handler(State(state), Json(req)).await.unwrap();
        assert_eq!(response.number, 97);
        assert_eq!(response.factors, vec![97]);
    }

    #[tokio::test]
    async fn test_invalid_number_skips_cache() {
        let state = AppState::default();

        let result = factor_path_handler(State(state.clone()), Path("abc".to_string())).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
        assert_eq!(state.cache.attempts(), 0);
        assert_eq!(state.requests(), 1);
    }

    #[tokio::test]
    async fn test_zero_is_compute_failure() {
        let state = AppState::default();
        factor_path_handler(State(state.clone()), Path("5".to_string()))
            .await
            .unwrap();

        let result = factor_path_handler(State(state.clone()), Path("0".to_string())).await;
        assert!(matches!(result, Err(ServiceError::Compute(_))));
        assert_eq!(state.cache.cached_key(), Some(5));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::default();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.attempts, 0);
        assert_eq!(response.hits, 0);
        assert_eq!(response.cached_number, None);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
