//! Least-squares trend fitting for rent series.

use crate::analyzers::utility::{mean, round_to, variance};
use crate::error::RaterError;

/// Slope of the fitted line and how much of the rent variance it explains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendResult {
    pub slope: f64,
    /// `1 - var(residuals) / var(y)`, rounded to 2 decimals.
    pub r_squared: f64,
}

impl TrendResult {
    /// Stand-in for a series too short to fit: no trend, nothing explained.
    pub const FLAT: TrendResult = TrendResult {
        slope: 0.0,
        r_squared: 0.0,
    };

    /// Fits `y = slope * x + intercept` through `points` by ordinary least squares.
    ///
    /// Points are sorted by `x` on a private copy before fitting. A series whose
    /// rents never change has nothing to explain, so its `r_squared` is 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`RaterError::DegenerateSeries`] when there are fewer than two
    /// points or every point shares the same `x`.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, RaterError> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let xs: Vec<f64> = sorted.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = sorted.iter().map(|p| p.1).collect();

        let x_mean = mean(&xs);
        let y_mean = mean(&ys);
        let x_var = variance(&xs, x_mean);

        if xs.len() < 2 || x_var == 0.0 {
            return Err(RaterError::DegenerateSeries { points: xs.len() });
        }

        let covariance = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum::<f64>()
            / xs.len() as f64;

        let slope = covariance / x_var;
        let intercept = y_mean - slope * x_mean;

        let y_var = variance(&ys, y_mean);
        if y_var == 0.0 {
            return Ok(TrendResult {
                slope,
                r_squared: 0.0,
            });
        }

        let residuals: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| slope * x + intercept - y)
            .collect();
        let residual_var = variance(&residuals, mean(&residuals));

        Ok(TrendResult {
            slope,
            r_squared: round_to(1.0 - residual_var / y_var, 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(ys: &[f64]) -> Vec<(f64, f64)> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| ((i + 1) as f64, *y))
            .collect()
    }

    #[test]
    fn test_perfect_line() {
        let points: Vec<(f64, f64)> = (1..=5).map(|x| (x as f64, 2.0 * x as f64 + 1.0)).collect();
        let fit = TrendResult::fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let points = vec![(3.0, 1100.0), (1.0, 1000.0), (2.0, 1050.0)];
        let fit = TrendResult::fit(&points).unwrap();
        assert!((fit.slope - 50.0).abs() < 1e-9);
        assert_eq!(fit.r_squared, 1.0);
        // input untouched
        assert_eq!(points[0], (3.0, 1100.0));
    }

    #[test]
    fn test_noisy_series_is_rounded() {
        let fit = TrendResult::fit(&series(&[1.0, 3.0, 2.0, 4.0])).unwrap();
        // slope = 0.8, r^2 = 0.64
        assert!((fit.slope - 0.8).abs() < 1e-9);
        assert_eq!(fit.r_squared, 0.64);
    }

    #[test]
    fn test_gaps_in_months() {
        let points = vec![(1.0, 100.0), (4.0, 130.0), (6.0, 150.0)];
        let fit = TrendResult::fit(&points).unwrap();
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_constant_series_is_flat_with_zero_r_squared() {
        let fit = TrendResult::fit(&series(&[5.0, 5.0, 5.0])).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 0.0);
        assert!(!fit.r_squared.is_nan());
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let err = TrendResult::fit(&series(&[900.0])).unwrap_err();
        assert!(matches!(err, RaterError::DegenerateSeries { points: 1 }));
    }

    #[test]
    fn test_empty_is_degenerate() {
        let err = TrendResult::fit(&[]).unwrap_err();
        assert!(matches!(err, RaterError::DegenerateSeries { points: 0 }));
    }

    #[test]
    fn test_shared_x_is_degenerate() {
        let err = TrendResult::fit(&[(2.0, 1.0), (2.0, 3.0)]).unwrap_err();
        assert!(matches!(err, RaterError::DegenerateSeries { points: 2 }));
    }
}
