//! Feature preparation: design-matrix augmentation and z-score scaling

mod scaler;

pub use scaler::PooledStandardScaler;

use ndarray::{s, Array2};

/// Prepend a constant 1.0 column so the first coefficient acts as the
/// intercept. Must be applied identically to train and test matrices before
/// any optimizer or prediction step.
pub fn add_intercept_column(m: &Array2<f64>) -> Array2<f64> {
    let (n, p) = m.dim();
    let mut design = Array2::zeros((n, p + 1));
    design.column_mut(0).fill(1.0);
    design.slice_mut(s![.., 1..]).assign(m);
    design
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_intercept_column_is_all_ones() {
        let m = array![[2.0, 3.0], [4.0, 5.0], [6.0, 7.0]];
        let design = add_intercept_column(&m);
        assert_eq!(design.dim(), (3, 3));
        assert!(design.column(0).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_feature_columns_unchanged() {
        let m = array![[2.0, 3.0], [4.0, 5.0]];
        let design = add_intercept_column(&m);
        for j in 0..m.ncols() {
            assert_eq!(design.column(j + 1).to_vec(), m.column(j).to_vec());
        }
    }

    #[test]
    fn test_empty_feature_matrix() {
        let m = Array2::<f64>::zeros((4, 0));
        let design = add_intercept_column(&m);
        assert_eq!(design.dim(), (4, 1));
        assert!(design.column(0).iter().all(|&v| v == 1.0));
    }
}
