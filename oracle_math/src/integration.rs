//! Numerical integration over evenly spaced samples

/// Area under a curve sampled at unit spacing, using the trapezoidal rule.
///
/// Fewer than two samples enclose no area and yield `0.0`.
///
/// ```
/// use oracle_math::trapezoid;
///
/// assert_eq!(trapezoid(&[1.0, 2.0, 3.0]), 4.0);
/// assert_eq!(trapezoid(&[5.0]), 0.0);
/// ```
pub fn trapezoid(values: &[f64]) -> f64 {
    values.windows(2).map(|w| (w[0] + w[1]) / 2.0).sum()
}
