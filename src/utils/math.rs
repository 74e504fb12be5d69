//! Mathematical utility functions for metric computation
//!
//! Division helpers with zero-division handling. Every metric value in the
//! crate goes through one of these so that empty sets and zero denominators
//! produce `0.0`, never `NaN` or infinity.

/// Divide two sums, returning 0.0 if the denominator is zero or the result is
/// not finite.
///
/// # Examples
/// ```
/// use sales_analytics::utils::math::safe_ratio;
///
/// assert_eq!(safe_ratio(300.0, 4.0), 75.0);
/// assert_eq!(safe_ratio(50.0, 0.0), 0.0);
/// assert_eq!(safe_ratio(0.0, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Percentage of `part` in `total`, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use sales_analytics::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(1.0, 4.0), 25.0);
/// assert_eq!(safe_percentage(50.0, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_percentage(part: f64, total: f64) -> f64 {
    safe_ratio(part, total) * 100.0
}

/// Replace NaN and infinities with 0.0
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    safe_ratio(values.iter().sum(), values.len() as f64)
}
