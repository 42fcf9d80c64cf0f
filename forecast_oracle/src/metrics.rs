//! Pointwise accuracy diagnostics for a rollout
//!
//! These are reported next to the area-based confidence and never feed into it.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    /// Number of compared points
    pub points: usize,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (points with a zero actual value are skipped)
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    let nonzero = actual.iter().filter(|&&a| a != 0.0).count();
    let mape = if nonzero > 0 {
        actual
            .iter()
            .zip(errors.iter())
            .filter(|(&a, _)| a != 0.0)
            .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
            .sum::<f64>()
            / nonzero as f64
    } else {
        0.0
    };

    let smape = actual
        .iter()
        .zip(forecast.iter())
        .map(|(&a, &f)| {
            let denominator = a.abs() + f.abs();
            if denominator == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denominator
            }
        })
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        points: forecast.len(),
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

/// Compare generated points (dated after `divergence_date`) with the real values on
/// the same dates. `None` when no date overlaps.
pub fn rollout_accuracy(
    rollout: &TimeSeries,
    real: &TimeSeries,
    divergence_date: NaiveDate,
) -> Option<ForecastAccuracy> {
    let actual_by_date: HashMap<NaiveDate, f64> =
        real.points().iter().map(|p| (p.date, p.value)).collect();

    let (forecast, actual): (Vec<f64>, Vec<f64>) = rollout
        .points()
        .iter()
        .filter(|p| p.date > divergence_date)
        .filter_map(|p| actual_by_date.get(&p.date).map(|&a| (p.value, a)))
        .unzip();

    forecast_accuracy(&forecast, &actual).ok()
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics ({} points):", self.points)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}
