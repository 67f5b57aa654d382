//! Error types for the factor service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::factor::FactorError;

// == Service Error Enum ==
/// Unified error type for the factor service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request could not be read as a number
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The factorization itself failed
    #[error("Computation failed: {0}")]
    Compute(#[from] FactorError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Compute(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the factor service.
pub type Result<T> = std::result::Result<T, ServiceError>;
