//! API Module
//!
//! HTTP handlers and routing for the factor service REST API.
//!
//! # Endpoints
//! - `GET /factor/:number` - Factor a number given in the path
//! - `POST /factor` - Factor a number given in a JSON body
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
