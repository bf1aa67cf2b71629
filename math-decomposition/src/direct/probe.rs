//! Positive-definiteness probe
//!
//! Runs a trial Cholesky elimination on a scratch copy and reports whether
//! every diagonal pivot stayed strictly positive. The probe never fails:
//! anything that would break the elimination (non-square or asymmetric input,
//! NaN or infinite intermediates, rounding that drives a pivot to zero) is
//! reported as "not positive-definite" so the caller falls back to LU.

use super::cholesky::{PivotBreakdown, eliminate};
use ndarray::ArrayView2;

/// Returns `true` iff `a` is symmetric and a Cholesky elimination of `a`
/// completes with every pivot strictly positive.
///
/// `a` is left untouched; the elimination works on its own buffer.
pub fn is_positive_definite(a: ArrayView2<f64>) -> bool {
    if !is_symmetric(a) {
        return false;
    }

    match eliminate(a) {
        Ok(l) => l.iter().all(|v| v.is_finite()),
        Err(PivotBreakdown { row, pivot }) => {
            log::trace!("positive-definite probe rejected pivot {} = {:e}", row, pivot);
            false
        }
    }
}

/// Exact symmetry check: `a[i, j] == a[j, i]` for every pair.
pub fn is_symmetric(a: ArrayView2<f64>) -> bool {
    let n = a.nrows();
    if n != a.ncols() {
        return false;
    }
    (0..n).all(|i| ((i + 1)..n).all(|j| a[[i, j]] == a[[j, i]]))
}
