//! Error types for the displacement engine.
//!
//! Only configuration problems are fatal. Missing sources, malformed points and
//! near-zero denominators are handled inside the pipeline and reported as
//! diagnostics, so they never surface through this type.

use thiserror::Error;

/// The main error type for displacement engine operations.
#[derive(Debug, Error)]
pub enum DisplacementError {
    /// The engine configuration is unusable (weights, ranges, window).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A period key could not be parsed.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from JSON (de)serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for DisplacementError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for DisplacementError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for displacement engine operations.
pub type Result<T> = std::result::Result<T, DisplacementError>;
