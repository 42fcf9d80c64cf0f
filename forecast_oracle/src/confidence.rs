//! Area-based confidence of a rollout
//!
//! The last `window_days` values of the rollout and of the real series are each
//! integrated with the trapezoidal rule (unit spacing), and
//!
//! ```text
//! confidence = 1 - |area_pred - area_real| / max(area_pred, area_real)
//! ```
//!
//! clamped to `[0, 1]`, or `0.0` when the larger area is zero.
//!
//! # Known weakness
//!
//! Only aggregate magnitude is compared. A forecast that mirrors the real curve
//! (rising where it falls) but encloses the same area scores `1.0`. Pointwise errors
//! are reported separately in [`ConfidenceResult::accuracy`].

use crate::data::TimeSeries;
use crate::error::Result;
use crate::metrics::{rollout_accuracy, ForecastAccuracy};
use crate::predictors::NextValuePredictor;
use crate::rollout::RolloutEngine;
use chrono::NaiveDate;
use oracle_math::trapezoid;
use serde::Serialize;
use tracing::info;

/// Confidence together with the rollout it was computed from
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceResult {
    /// Area similarity in `[0, 1]`
    pub confidence: f64,
    /// Historical prefix plus generated points
    pub rollout: TimeSeries,
    /// Last historical date of the rollout
    pub divergence_date: NaiveDate,
    /// Pointwise errors over the generated dates that exist in the real series
    pub accuracy: Option<ForecastAccuracy>,
}

/// Trapezoidal area under the last `window_days` values of `series`
pub fn area_under_curve(series: &TimeSeries, window_days: usize) -> f64 {
    trapezoid(&series.tail_values(window_days))
}

/// Compare the last `window_days` of `rollout_series` and `real_series` by area
pub fn score(rollout_series: &TimeSeries, real_series: &TimeSeries, window_days: usize) -> f64 {
    let area_pred = area_under_curve(rollout_series, window_days);
    let area_real = area_under_curve(real_series, window_days);

    let max_area = area_pred.max(area_real);
    if max_area == 0.0 {
        return 0.0;
    }

    let confidence = 1.0 - (area_pred - area_real).abs() / max_area;
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Roll `series` forward over `horizon_days` and score the result against the real tail
pub fn check_confidence(
    series: &TimeSeries,
    horizon_days: usize,
    lag_days: usize,
    predictor: &dyn NextValuePredictor,
) -> Result<ConfidenceResult> {
    let rollout = RolloutEngine::new(predictor, lag_days)?.rollout(series, horizon_days)?;

    let confidence = score(&rollout.series, series, horizon_days);
    let accuracy = rollout_accuracy(&rollout.series, series, rollout.divergence_date);

    info!(
        predictor = predictor.name(),
        horizon_days = rollout.horizon_days,
        lag_days,
        confidence,
        "backtest complete"
    );

    Ok(ConfidenceResult {
        confidence,
        rollout: rollout.series,
        divergence_date: rollout.divergence_date,
        accuracy,
    })
}
