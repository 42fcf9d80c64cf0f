//! # Oracle Math
//!
//! Numeric kernels used by the forecasting engine.
//! This crate has no notion of dates or prices; it works on plain slices.
//!
//! - [`regression`]: ordinary least squares with an intercept
//! - [`integration`]: unit-step trapezoidal area under a curve

use thiserror::Error;

pub mod integration;
pub mod regression;

pub use integration::trapezoid;
pub use regression::LinearModel;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
