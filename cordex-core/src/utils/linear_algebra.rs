//! Linear algebra utilities.
//!
//! Least squares problems here are solved through the singular value
//! decomposition so that rank deficient design matrices never fail: singular
//! values below the cutoff are treated as zero and the minimum-norm solution is
//! returned.

use crate::errors::{CordexError, CordexResult};
use nalgebra::DMatrix;
#[cfg(test)]
use nalgebra::DVector;

/// Relative cutoff for small singular values.
///
/// Matches the usual `max(rows, cols) * machine epsilon` convention, scaled by the
/// largest singular value of the matrix being decomposed.
fn singular_value_cutoff(matrix: &DMatrix<f64>, largest: f64) -> f64 {
    let n = matrix.nrows().max(matrix.ncols()) as f64;
    f64::EPSILON * n * largest
}

/// Solve `A x ≈ b` in the least squares sense for a single right-hand side.
///
/// Reference solver for checking [`pseudo_inverse`] based fits; returns the minimum-norm
/// coefficient vector.
#[cfg(test)]
pub(crate) fn least_squares(
    design: &DMatrix<f64>,
    rhs: &DVector<f64>,
) -> CordexResult<DVector<f64>> {
    if design.nrows() != rhs.len() {
        return Err(CordexError::ShapeMismatch {
            axis: "observations",
            expected: design.nrows(),
            got: rhs.len(),
        });
    }

    let svd = design.clone().svd(true, true);
    let eps = singular_value_cutoff(design, svd.singular_values.max());
    svd.solve(rhs, eps)
        .map_err(|e| CordexError::LeastSquares(e.to_string()))
}

/// Moore-Penrose pseudo-inverse of `matrix`.
///
/// Useful when the same design matrix is solved against many right-hand sides:
/// `pseudo_inverse(A) * b` is the minimum-norm least squares solution for each `b`.
pub fn pseudo_inverse(matrix: &DMatrix<f64>) -> CordexResult<DMatrix<f64>> {
    let svd = matrix.clone().svd(true, true);
    let eps = singular_value_cutoff(matrix, svd.singular_values.max());
    svd.pseudo_inverse(eps)
        .map_err(|e| CordexError::LeastSquares(e.to_string()))
}
