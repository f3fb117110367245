//! Pooled z-score scaler
//!
//! Statistics are computed over the union of train and test rows so both
//! tables end up on an identical scale. Never inverted: downstream training
//! and prediction run entirely on the rescaled features.

use crate::error::{LogRegError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature z-score scaler fitted on pooled statistics.
///
/// Uses the population standard deviation (divisor n, not n-1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PooledStandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
    is_fitted: bool,
}

impl Default for PooledStandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl PooledStandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self {
            means: Array1::zeros(0),
            stds: Array1::zeros(0),
            is_fitted: false,
        }
    }

    /// Fit per-feature mean and population standard deviation over all rows
    /// of every supplied table. Fails if any feature has zero pooled variance,
    /// which would otherwise put NaNs into every downstream coefficient.
    pub fn fit(&mut self, tables: &[&Array2<f64>]) -> Result<&mut Self> {
        let p = match tables.first() {
            Some(t) => t.ncols(),
            None => {
                return Err(LogRegError::PreprocessingError(
                    "no tables supplied to fit pooled statistics".to_string(),
                ))
            }
        };
        for t in tables {
            if t.ncols() != p {
                return Err(LogRegError::ShapeError {
                    expected: format!("{} feature columns", p),
                    actual: format!("{} feature columns", t.ncols()),
                });
            }
        }

        let n: usize = tables.iter().map(|t| t.nrows()).sum();
        if n == 0 {
            return Err(LogRegError::PreprocessingError(
                "cannot fit scaler on zero rows".to_string(),
            ));
        }

        let mut means = Array1::zeros(p);
        for t in tables {
            for row in t.rows() {
                means += &row;
            }
        }
        means /= n as f64;

        let mut variances = Array1::<f64>::zeros(p);
        for t in tables {
            for row in t.rows() {
                let centered = &row - &means;
                variances += &centered.mapv(|v| v * v);
            }
        }
        variances /= n as f64;

        for (j, &var) in variances.iter().enumerate() {
            if var == 0.0 {
                return Err(LogRegError::PreprocessingError(format!(
                    "feature column {} has zero pooled variance",
                    j
                )));
            }
        }

        self.means = means;
        self.stds = variances.mapv(f64::sqrt);
        self.is_fitted = true;
        Ok(self)
    }

    /// Rescale a table as `(x - mean) / std` using the fitted pooled statistics
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(LogRegError::ModelNotFitted);
        }
        if x.ncols() != self.means.len() {
            return Err(LogRegError::ShapeError {
                expected: format!("{} feature columns", self.means.len()),
                actual: format!("{} feature columns", x.ncols()),
            });
        }
        let centered = x - &self.means.clone().insert_axis(Axis(0));
        Ok(centered / &self.stds.clone().insert_axis(Axis(0)))
    }

    /// Fitted per-feature means
    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Fitted per-feature population standard deviations
    pub fn stds(&self) -> &Array1<f64> {
        &self.stds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_pooled_statistics() {
        // Pooled column [1,2,3,4] -> mean 2.5, population std sqrt(1.25)
        let train = array![[1.0], [2.0]];
        let test = array![[3.0], [4.0]];

        let mut scaler = PooledStandardScaler::new();
        scaler.fit(&[&train, &test]).unwrap();

        assert_abs_diff_eq!(scaler.means()[0], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(scaler.stds()[0], 1.25f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_at_mean_is_zero() {
        let train = array![[1.0], [2.0]];
        let test = array![[3.0], [4.0]];

        let mut scaler = PooledStandardScaler::new();
        scaler.fit(&[&train, &test]).unwrap();

        let scaled = scaler.transform(&array![[2.5]]).unwrap();
        assert_eq!(scaled[[0, 0]], 0.0);
    }

    #[test]
    fn test_transform_values() {
        let data = array![[1.0], [2.0], [3.0], [4.0]];
        let mut scaler = PooledStandardScaler::new();
        scaler.fit(&[&data]).unwrap();

        let scaled = scaler.transform(&data).unwrap();
        let std = 1.25f64.sqrt();
        for (i, &v) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            assert_abs_diff_eq!(scaled[[i, 0]], (v - 2.5) / std, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_variance_feature_fails() {
        let train = array![[1.0, 7.0], [2.0, 7.0]];
        let test = array![[3.0, 7.0]];

        let mut scaler = PooledStandardScaler::new();
        let err = scaler.fit(&[&train, &test]).unwrap_err();
        assert!(matches!(err, LogRegError::PreprocessingError(_)));
        assert!(err.to_string().contains("zero pooled variance"));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let scaler = PooledStandardScaler::new();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, LogRegError::ModelNotFitted));
    }

    #[test]
    fn test_mismatched_widths_fail() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0]];
        let mut scaler = PooledStandardScaler::new();
        let err = scaler.fit(&[&a, &b]).unwrap_err();
        assert!(matches!(err, LogRegError::ShapeError { .. }));
    }
}
