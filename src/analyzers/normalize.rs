use crate::analyzers::types::{Bounds, Metric};
use crate::error::RaterError;

/// Rescales `value` from the cohort range `bounds` onto 0–100.
///
/// `bounds.min` maps to 0 and `bounds.max` to 100.
///
/// # Errors
///
/// Returns [`RaterError::DegenerateCohort`] when the range is empty
/// (`max == min`) or was never observed.
pub fn scale_to_100(value: f64, bounds: Bounds, metric: Metric) -> Result<f64, RaterError> {
    let range = bounds.max - bounds.min;
    if range == 0.0 || !range.is_finite() {
        return Err(RaterError::DegenerateCohort {
            metric,
            value: bounds.max,
        });
    }
    Ok((value - bounds.min) * 100.0 / range)
}
