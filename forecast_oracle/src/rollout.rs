//! Recursive multi-day rollout
//!
//! The series is split at the divergence point into a historical prefix and a truth
//! suffix. Starting from the prefix, the predictor is asked for one day at a time and
//! each prediction is appended before the next call, until the rollout reaches the
//! series' last date.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::predictors::{NextValuePredictor, PredictionContext};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

/// Output of a rollout
#[derive(Debug, Clone, Serialize)]
pub struct Rollout {
    /// Historical prefix followed by the generated points
    pub series: TimeSeries,
    /// Last historical date; generated points start the day after
    pub divergence_date: NaiveDate,
    /// Horizon after clamping
    pub horizon_days: usize,
    /// Number of generated points
    pub generated: usize,
}

/// Drives a one-step predictor forward over a horizon
pub struct RolloutEngine<'p> {
    predictor: &'p dyn NextValuePredictor,
    lag_days: usize,
}

impl<'p> RolloutEngine<'p> {
    /// Create an engine around `predictor`
    pub fn new(predictor: &'p dyn NextValuePredictor, lag_days: usize) -> Result<Self> {
        if lag_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "lag_days must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            predictor,
            lag_days,
        })
    }

    /// Horizon actually used for a series of `len` points: between 1 and `len - 1`
    pub fn effective_horizon(len: usize, horizon_days: usize) -> usize {
        horizon_days.min(len.saturating_sub(1)).max(1)
    }

    /// Replay the last `horizon_days` of `series` with predictions.
    ///
    /// `series` itself is never modified.
    pub fn rollout(&self, series: &TimeSeries, horizon_days: usize) -> Result<Rollout> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => (first.date, last.date),
            _ => {
                return Err(ForecastError::InsufficientData(format!(
                    "a rollout needs at least 2 points, have {}",
                    series.len()
                )))
            }
        };

        let horizon = Self::effective_horizon(series.len(), horizon_days);
        if horizon != horizon_days {
            warn!(
                requested = horizon_days,
                used = horizon,
                points = series.len(),
                "horizon clamped"
            );
        }

        let mut predictions = series.head(series.len() - horizon);
        let divergence_date = predictions
            .last()
            .map(|p| p.date)
            .ok_or_else(|| ForecastError::InsufficientData("empty historical prefix".to_string()))?;

        let mut day_offset = 0;
        let mut last_date = divergence_date;
        while last_date < last {
            let context = PredictionContext::new(&predictions, self.lag_days)
                .with_day_offset(day_offset);
            let value = self.predictor.predict_next(&context)?;
            let next_date = next_day(last_date)?;

            debug!(
                predictor = self.predictor.name(),
                date = %next_date,
                value,
                "rollout step"
            );
            predictions.push(next_date, value)?;
            last_date = next_date;
            day_offset += 1;
        }

        let kept: Vec<_> = predictions
            .points()
            .iter()
            .filter(|p| p.date >= first)
            .copied()
            .collect();
        let series = TimeSeries::new(kept)?;

        Ok(Rollout {
            series,
            divergence_date,
            horizon_days: horizon,
            generated: day_offset,
        })
    }
}

/// Roll `series` forward over `horizon_days` with `predictor` and return the result series
pub fn rollout(
    series: &TimeSeries,
    horizon_days: usize,
    lag_days: usize,
    predictor: &dyn NextValuePredictor,
) -> Result<TimeSeries> {
    Ok(RolloutEngine::new(predictor, lag_days)?
        .rollout(series, horizon_days)?
        .series)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| ForecastError::DataError(format!("no calendar day after {}", date)))
}
