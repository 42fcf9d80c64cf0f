//! Ordinary least squares regression
//!
//! Fits `y = intercept + Σ coefficient_j * x_j` by centring the features and the target,
//! solving the normal equations on the centred data, and recovering the intercept from
//! the means. When the centred features are rank deficient (collinear lags, constant
//! columns, a single sample) the minimum-norm coefficient vector is returned.

use crate::{MathError, Result};
use nalgebra::{DMatrix, DVector};

/// Singular values below this fraction of the largest one are treated as zero.
const RELATIVE_RANK_TOLERANCE: f64 = 1e-10;

/// A fitted linear mapping from a feature vector to a scalar
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Fit the model on `rows` (one feature vector per sample) against `targets`
    pub fn fit<R: AsRef<[f64]>>(rows: &[R], targets: &[f64]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(MathError::InsufficientData(
                "Need at least one sample to fit a linear model".to_string(),
            ));
        }
        if targets.len() != n {
            return Err(MathError::InvalidInput(format!(
                "Sample count ({}) doesn't match target count ({})",
                n,
                targets.len()
            )));
        }

        let p = rows[0].as_ref().len();
        if p == 0 {
            return Err(MathError::InvalidInput(
                "Feature vectors must not be empty".to_string(),
            ));
        }
        if let Some(bad) = rows.iter().position(|r| r.as_ref().len() != p) {
            return Err(MathError::InvalidInput(format!(
                "Sample {} has {} features, expected {}",
                bad,
                rows[bad].as_ref().len(),
                p
            )));
        }
        let all_finite = rows
            .iter()
            .flat_map(|r| r.as_ref().iter())
            .chain(targets.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(MathError::InvalidInput(
                "Samples contain NaN or infinite values".to_string(),
            ));
        }

        let feature_means: Vec<f64> = (0..p)
            .map(|j| rows.iter().map(|r| r.as_ref()[j]).sum::<f64>() / n as f64)
            .collect();
        let target_mean = targets.iter().sum::<f64>() / n as f64;

        let x = DMatrix::from_fn(n, p, |i, j| rows[i].as_ref()[j] - feature_means[j]);
        let y = DVector::from_iterator(n, targets.iter().map(|t| t - target_mean));

        let xtx = x.transpose() * &x;
        let xty = x.transpose() * &y;
        let beta = solve_min_norm(xtx, xty)?;

        let coefficients: Vec<f64> = beta.iter().copied().collect();
        let intercept = target_mean
            - coefficients
                .iter()
                .zip(&feature_means)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Apply the model to one feature vector
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let weighted: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + weighted)
    }

    /// Fitted coefficients, one per feature
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Fitted intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Solve `xtx * beta = xty`, falling back to the pseudo-inverse when `xtx` is singular.
fn solve_min_norm(xtx: DMatrix<f64>, xty: DVector<f64>) -> Result<DVector<f64>> {
    let p = xtx.nrows();
    let svd = xtx.clone().svd(true, true);
    let max_singular = svd.singular_values.max();

    // Every centred feature is constant: the intercept alone explains the target
    if max_singular <= 0.0 {
        return Ok(DVector::zeros(p));
    }

    let tolerance = max_singular * RELATIVE_RANK_TOLERANCE;
    if svd.rank(tolerance) == p {
        if let Some(beta) = xtx.lu().solve(&xty) {
            return Ok(beta);
        }
    }

    svd.solve(&xty, tolerance)
        .map_err(|e| MathError::CalculationError(e.to_string()))
}
