//! One-step-ahead predictors
//!
//! Every predictor answers the same question: given what is known so far, what is the
//! next day's value? The rollout engine only sees [`NextValuePredictor`], so the
//! autoregressive and sentiment predictors are interchangeable inside it.

use crate::data::TimeSeries;
use crate::error::Result;

pub mod autoregressive;
pub mod sentiment;

pub use autoregressive::{AutoregressiveModel, AutoregressivePredictor, LaggedSample};
pub use sentiment::SentimentPredictor;

/// What a predictor may look at when producing the next value
#[derive(Debug, Clone, Copy)]
pub struct PredictionContext<'a> {
    /// Series known so far (history plus any forecasts already appended)
    pub history: &'a TimeSeries,
    /// Number of preceding days used as input
    pub lag_days: usize,
    /// Days elapsed since the divergence point, when running inside a backtest
    pub day_offset: Option<usize>,
}

impl<'a> PredictionContext<'a> {
    /// Context for a standalone prediction on `history`
    pub fn new(history: &'a TimeSeries, lag_days: usize) -> Self {
        Self {
            history,
            lag_days,
            day_offset: None,
        }
    }

    /// Mark the context as step `day_offset` of a backtest
    pub fn with_day_offset(mut self, day_offset: usize) -> Self {
        self.day_offset = Some(day_offset);
        self
    }
}

/// Capability shared by all one-step predictors
pub trait NextValuePredictor {
    /// Predict the value for the day after the context's last known day
    fn predict_next(&self, context: &PredictionContext<'_>) -> Result<f64>;

    /// Name of the predictor
    fn name(&self) -> &str;
}
