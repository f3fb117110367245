//! Dense matrix inversion for the Newton-Raphson step

use ndarray::Array2;

const PIVOT_TOL: f64 = 1e-10;

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
/// Returns `None` when a pivot falls below tolerance (singular matrix).
///
/// The Hessians this crate inverts are small (p+1 square for p features), so
/// the O(p^3) cost is irrelevant next to Hessian assembly.
pub(crate) fn invert(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n != m.ncols() {
        return None;
    }

    // Augmented system [M | I]
    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                aug[[a, col]]
                    .abs()
                    .partial_cmp(&aug[[b, col]].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        if aug[[pivot_row, col]].abs() < PIVOT_TOL {
            return None;
        }

        if pivot_row != col {
            for j in 0..2 * n {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }
    Some(inv)
}
