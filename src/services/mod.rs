//! Service layer over the calculation engines.

pub mod calculator;

pub use calculator::{CalculationRequest, CalculatorService};

use crate::validation::ValidationError;

/// Errors returned by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}
