//! Error types for the forecast_oracle crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the forecast_oracle crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A persisted series row could not be parsed
    #[error("Format error: {0}")]
    FormatError(String),

    /// Not enough points to fit or roll out
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error related to data validation (ordering, duplicates)
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] oracle_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}
