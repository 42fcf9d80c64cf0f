//! # Forecast Oracle
//!
//! Forecasting and backtesting engine for a daily univariate series (a stock's closing
//! price).
//!
//! ## Features
//!
//! - Daily `(date, value)` series with a two-column persisted form
//! - Lag-based autoregressive one-step predictor (least squares, refit on every call)
//! - Sentiment-driven one-step predictor fed by a news collaborator
//! - Recursive rollout that replays the end of a series with either predictor
//! - Area-based confidence comparing a rollout with the realised tail
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_oracle::confidence::check_confidence;
//! use forecast_oracle::predictors::AutoregressivePredictor;
//! use forecast_oracle::store::SeriesStore;
//!
//! # fn main() -> forecast_oracle::Result<()> {
//! // Load the persisted series
//! let series = SeriesStore::new("data.csv").load()?;
//!
//! // Replay the last 10 days with a 30-day lag window
//! let predictor = AutoregressivePredictor::new();
//! let result = check_confidence(&series, 10, 30, &predictor)?;
//!
//! println!("confidence: {:.3}", result.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Everything is synchronous. A [`TimeSeries`] must not be mutated by two callers at
//! once; each rollout works on its own copy and returns a new series. Nothing caches a
//! fitted model between calls.

pub mod config;
pub mod confidence;
pub mod data;
pub mod error;
pub mod metrics;
pub mod news;
pub mod predictors;
pub mod rollout;
pub mod store;

// Re-export commonly used types
pub use crate::confidence::{check_confidence, score, ConfidenceResult};
pub use crate::data::{DataPoint, TimeSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::predictors::{
    AutoregressivePredictor, NextValuePredictor, PredictionContext, SentimentPredictor,
};
pub use crate::rollout::{rollout, Rollout, RolloutEngine};
pub use crate::store::SeriesStore;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
