//! Request DTOs for the factor service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::factor::{parse_number, FactorError};

/// Request body for POST /factor
///
/// The number may be sent as a JSON number or as a decimal string, so
/// clients are not limited by their own integer precision.
#[derive(Debug, Clone, Deserialize)]
pub struct FactorRequest {
    /// The number to factor
    pub number: NumberInput,
}

/// A number as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Int(u64),
    Text(String),
}

impl FactorRequest {
    /// Extracts the number to factor from the request.
    pub fn number(&self) -> Result<u64, FactorError> {
        match &self.number {
            NumberInput::Int(n) => Ok(*n),
            NumberInput::Text(raw) => parse_number(raw),
        }
    }
}
