//! # Stock Oracle
//!
//! Workspace facade for the stock oracle forecaster.
//!
//! - [`forecast_oracle`]: time series, predictors, rollout and confidence scoring
//! - [`oracle_math`]: least squares and trapezoidal integration
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use stock_oracle_workspace::forecast_oracle::{AutoregressivePredictor, TimeSeries};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series = TimeSeries::from_pairs(
//!     (0..4).map(|i| (start + chrono::Days::new(i), 100.0 + i as f64)),
//! )
//! .unwrap();
//!
//! let next = AutoregressivePredictor::new()
//!     .fit_and_predict_next(&series, 1, None)
//!     .unwrap();
//! assert_eq!(next, 104.0);
//! ```

pub use forecast_oracle;
pub use oracle_math;
