//! Regression metrics for held-out evaluation.

use serde::{Deserialize, Serialize};

/// Regression metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

impl RegressionMetrics {
    /// Compare `predicted` against `actual`. Both slices must be the same
    /// non-zero length.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        debug_assert_eq!(actual.len(), predicted.len());
        let n = actual.len().max(1) as f64;

        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        for (a, p) in actual.iter().zip(predicted) {
            let err = a - p;
            abs_sum += err.abs();
            sq_sum += err * err;
        }

        let mean = actual.iter().sum::<f64>() / n;
        let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
        let r_squared = if ss_tot > 0.0 {
            1.0 - sq_sum / ss_tot
        } else if sq_sum == 0.0 {
            1.0
        } else {
            0.0
        };

        let mse = sq_sum / n;
        Self {
            mae: abs_sum / n,
            mse,
            rmse: mse.sqrt(),
            r_squared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_fit() {
        let m = RegressionMetrics::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.r_squared, 1.0);
    }

    #[test]
    fn test_known_errors() {
        let m = RegressionMetrics::compute(&[2.0, 4.0, 6.0, 8.0], &[3.0, 3.0, 6.0, 10.0]);
        assert!((m.mae - 1.0).abs() < 1e-12);
        assert!((m.mse - 1.5).abs() < 1e-12);
        assert!((m.rmse - 1.5_f64.sqrt()).abs() < 1e-12);
        // ss_tot = 9 + 1 + 1 + 9 = 20, ss_res = 6
        assert!((m.r_squared - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target() {
        let m = RegressionMetrics::compute(&[5.0, 5.0], &[4.0, 6.0]);
        assert_eq!(m.r_squared, 0.0);
        assert_eq!(m.mae, 1.0);
    }
}
