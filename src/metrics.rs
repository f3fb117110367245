//! Numeric primitives shared by the optimizers and the estimator

use ndarray::{Array1, Array2};

/// Floor added inside the log term of [`average_log_likelihood`] to avoid log(0)
const LOG_EPS: f64 = 1e-50;

/// Logistic function for a scalar linear predictor
pub fn sigmoid_scalar(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Elementwise logistic function. No input clamping; extreme predictors
/// saturate to 0.0 or 1.0 through f64 overflow of e^-z.
pub fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(sigmoid_scalar)
}

/// Diagnostic average log-likelihood over the design matrix.
///
/// Per-row term is `y_i * sigma(x_i . beta) - ln(1 + eps + sigma(x_i . beta))`.
/// This is NOT the Bernoulli log-likelihood (that would use `ln sigma` and
/// `ln(1 - sigma)`). Downstream consumers depend on this exact formula; it
/// feeds periodic progress output only and no training decision reads it,
/// so it must not be "corrected" to the Bernoulli form.
pub fn average_log_likelihood(x: &Array2<f64>, y: &Array1<f64>, beta: &Array1<f64>) -> f64 {
    let n = y.len();
    let mut log_l = 0.0;
    for (row, &yi) in x.rows().into_iter().zip(y.iter()) {
        let p = sigmoid_scalar(row.dot(beta));
        log_l += yi * p - (1.0 + LOG_EPS + p).ln();
    }
    log_l / n as f64
}

/// Fraction of entries where the thresholded prediction matches the label.
/// Returns a value in [0, 1].
pub fn accuracy(predicted: &Array1<f64>, actual: &Array1<f64>) -> f64 {
    let hits = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| (*p - *a).abs() < 0.5)
        .count();
    hits as f64 / predicted.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_sigmoid_open_unit_interval() {
        let z = array![-30.0, -1.0, 0.0, 1.0, 30.0];
        let s = sigmoid(&z);
        for &v in s.iter() {
            assert!(v > 0.0 && v < 1.0, "sigmoid out of (0,1): {}", v);
        }
        assert_abs_diff_eq!(s[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_monotone() {
        let z = array![-3.0, -1.0, 0.0, 0.5, 2.0, 10.0];
        let s = sigmoid(&z);
        for w in s.as_slice().unwrap().windows(2) {
            assert!(w[0] < w[1], "sigmoid not increasing: {} >= {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_average_log_likelihood_single_row() {
        // sigma(0) = 0.5, term = 1*0.5 - ln(1.5)
        let x = array![[1.0]];
        let y = array![1.0];
        let beta = array![0.0];
        let expected = 0.5 - 1.5f64.ln();
        assert_abs_diff_eq!(average_log_likelihood(&x, &y, &beta), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_average_log_likelihood_is_mean_over_rows() {
        let x = array![[1.0, 0.0], [1.0, 2.0]];
        let y = array![0.0, 1.0];
        let beta = array![0.5, -0.25];
        let t0 = 0.0 - (1.0 + sigmoid_scalar(0.5)).ln();
        let t1 = sigmoid_scalar(0.0) - (1.0 + sigmoid_scalar(0.0)).ln();
        assert_abs_diff_eq!(
            average_log_likelihood(&x, &y, &beta),
            (t0 + t1) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_accuracy_all_match() {
        let p = array![0.0, 1.0, 1.0, 0.0];
        assert_abs_diff_eq!(accuracy(&p, &p.clone()), 1.0);
    }

    #[test]
    fn test_accuracy_none_match() {
        let p = array![0.0, 1.0, 1.0];
        let a = array![1.0, 0.0, 0.0];
        assert_abs_diff_eq!(accuracy(&p, &a), 0.0);
    }

    #[test]
    fn test_accuracy_partial() {
        let p = array![0.0, 1.0, 1.0, 1.0];
        let a = array![0.0, 1.0, 0.0, 0.0];
        assert_abs_diff_eq!(accuracy(&p, &a), 0.5);
    }
}
