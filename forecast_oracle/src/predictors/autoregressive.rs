//! Lag-based autoregressive predictor
//!
//! Row `t` of the design matrix holds the `lag_days` values before `t`, most recent
//! first, and its target is the value at `t`. A least-squares fit over every complete
//! row gives the coefficients and intercept, which are applied to the latest
//! `lag_days` values. The model is refit from scratch on every call.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::predictors::{NextValuePredictor, PredictionContext};
use chrono::NaiveDate;
use oracle_math::LinearModel;
use tracing::debug;

/// Features and target derived from one position of a series
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedSample {
    /// Values at `t-1, t-2, ..., t-lag_days`
    pub features: Vec<f64>,
    /// Value at `t`
    pub target: f64,
}

/// Build every complete lagged sample of `values`
pub fn build_lagged_samples(values: &[f64], lag_days: usize) -> Vec<LaggedSample> {
    if lag_days == 0 {
        return Vec::new();
    }
    (lag_days..values.len())
        .map(|t| LaggedSample {
            features: (1..=lag_days).map(|k| values[t - k]).collect(),
            target: values[t],
        })
        .collect()
}

/// Fitted linear mapping from a lag vector to the next value
#[derive(Debug, Clone, PartialEq)]
pub struct AutoregressiveModel {
    lag_days: usize,
    model: LinearModel,
}

impl AutoregressiveModel {
    /// Predict the value following `recent`, which is ordered oldest to newest
    pub fn predict(&self, recent: &[f64]) -> Result<f64> {
        if recent.len() < self.lag_days {
            return Err(ForecastError::InsufficientData(format!(
                "need the last {} values to predict, have {}",
                self.lag_days,
                recent.len()
            )));
        }
        let lags: Vec<f64> = recent.iter().rev().take(self.lag_days).copied().collect();
        Ok(self.model.predict(&lags)?)
    }

    /// Coefficient per lag, lag 1 first
    pub fn coefficients(&self) -> &[f64] {
        self.model.coefficients()
    }

    /// Fitted intercept
    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    /// Number of lags the model consumes
    pub fn lag_days(&self) -> usize {
        self.lag_days
    }
}

/// Ordinary-least-squares autoregression on lagged values
#[derive(Debug, Clone)]
pub struct AutoregressivePredictor {
    name: String,
}

impl Default for AutoregressivePredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoregressivePredictor {
    /// Create a new autoregressive predictor
    pub fn new() -> Self {
        Self {
            name: "Autoregressive".to_string(),
        }
    }

    /// Fit a model on the points of `series` up to and including `as_of`
    /// (the whole series when `as_of` is `None`)
    pub fn fit(
        &self,
        series: &TimeSeries,
        lag_days: usize,
        as_of: Option<NaiveDate>,
    ) -> Result<AutoregressiveModel> {
        let values = available_values(series, lag_days, as_of)?;
        fit_values(&values, lag_days)
    }

    /// Fit on the available history and predict the following day
    pub fn fit_and_predict_next(
        &self,
        series: &TimeSeries,
        lag_days: usize,
        as_of: Option<NaiveDate>,
    ) -> Result<f64> {
        let values = available_values(series, lag_days, as_of)?;
        let model = fit_values(&values, lag_days)?;
        let prediction = model.predict(&values)?;

        debug!(
            lag_days,
            samples = values.len() - lag_days,
            intercept = model.intercept(),
            prediction,
            "autoregressive step"
        );
        Ok(prediction)
    }
}

impl NextValuePredictor for AutoregressivePredictor {
    fn predict_next(&self, context: &PredictionContext<'_>) -> Result<f64> {
        self.fit_and_predict_next(context.history, context.lag_days, None)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn available_values(
    series: &TimeSeries,
    lag_days: usize,
    as_of: Option<NaiveDate>,
) -> Result<Vec<f64>> {
    if lag_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "lag_days must be at least 1".to_string(),
        ));
    }

    let points = match as_of {
        Some(date) => series.up_to(date),
        None => series.points(),
    };
    if points.len() <= lag_days {
        return Err(ForecastError::InsufficientData(format!(
            "need at least {} points for lag_days={}, have {}",
            lag_days + 1,
            lag_days,
            points.len()
        )));
    }

    Ok(points.iter().map(|p| p.value).collect())
}

fn fit_values(values: &[f64], lag_days: usize) -> Result<AutoregressiveModel> {
    let samples = build_lagged_samples(values, lag_days);
    let rows: Vec<&[f64]> = samples.iter().map(|s| s.features.as_slice()).collect();
    let targets: Vec<f64> = samples.iter().map(|s| s.target).collect();

    Ok(AutoregressiveModel {
        lag_days,
        model: LinearModel::fit(&rows, &targets)?,
    })
}
