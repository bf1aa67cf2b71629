//! Cholesky decomposition solver
//!
//! Factorizes a symmetric positive-definite matrix as A = L·Lᵗ with L lower
//! triangular. Callers are expected to have run
//! [`is_positive_definite`](super::is_positive_definite) first; a non-positive
//! pivot here is reported as an internal invariant violation.

use super::triangular::{backward_substitution, forward_substitution};
use crate::error::{DecompositionError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Diagonal sum that stopped the elimination
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PivotBreakdown {
    pub row: usize,
    pub pivot: f64,
}

/// Row-by-row Cholesky elimination of a square `a`, shared by the factorizer
/// and `is_positive_definite`.
///
/// Only the lower triangle of the returned factor is written; the strict
/// upper triangle stays zero.
pub(super) fn eliminate(a: ArrayView2<f64>) -> std::result::Result<Array2<f64>, PivotBreakdown> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let mut sum = a[[i, j]];
            for k in 0..i {
                sum -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                if sum.is_nan() || sum <= 0.0 {
                    return Err(PivotBreakdown { row: i, pivot: sum });
                }
                l[[i, i]] = sum.sqrt();
            } else {
                l[[j, i]] = sum / l[[i, i]];
            }
        }
    }
    Ok(l)
}

/// Cholesky factorization result
///
/// Stores L and its transpose, computed once so repeated solves do not
/// re-transpose.
#[derive(Debug, Clone)]
pub struct CholeskyFactorization {
    /// Lower triangular factor (exact zeros above the diagonal)
    l: Array2<f64>,
    /// Cached transpose of `l`
    lt: Array2<f64>,
}

impl CholeskyFactorization {
    /// Compute the Cholesky factor of `a`, row by row.
    pub fn factorize(a: ArrayView2<f64>) -> Result<Self> {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(DecompositionError::NotSquare {
                rows: n,
                cols: a.ncols(),
            });
        }

        let mut l = eliminate(a).map_err(|PivotBreakdown { row, pivot }| {
            DecompositionError::FactorizationInvariant { row, pivot }
        })?;

        // Clear the strict upper triangle
        for i in 0..n {
            for j in (i + 1)..n {
                l[[i, j]] = 0.0;
            }
        }

        let lt = l.t().to_owned();
        Ok(Self { l, lt })
    }

    /// Matrix order
    pub fn n(&self) -> usize {
        self.l.nrows()
    }

    /// Lower triangular factor L
    pub fn l(&self) -> &Array2<f64> {
        &self.l
    }

    /// Upper triangular factor Lᵗ
    pub fn lt(&self) -> &Array2<f64> {
        &self.lt
    }

    /// Solve `L y = b` (forward) and return `y`
    pub fn forward(&self, b: ArrayView1<f64>) -> Result<Array1<f64>> {
        forward_substitution(self.l.view(), b)
    }

    /// Solve `Lᵗ x = y` (backward) and return `x`
    pub fn backward(&self, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        backward_substitution(self.lt.view(), y)
    }

    /// Solve Ax = b using the pre-computed factorization
    pub fn solve(&self, b: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.solve_traced(b, 0)
    }

    /// Solve, logging the intermediate vectors when `verbosity > 1`
    pub(crate) fn solve_traced(&self, b: ArrayView1<f64>, verbosity: usize) -> Result<Array1<f64>> {
        let y = self.forward(b)?;
        let x = self.backward(y.view())?;
        if verbosity > 1 {
            log::debug!("[Cholesky] forward y = {}", y);
            log::debug!("[Cholesky] backward x = {}", x);
        }
        Ok(x)
    }

    /// det(A) = Π L[i,i]²
    pub fn determinant(&self) -> f64 {
        self.l.diag().iter().map(|d| d * d).product()
    }

    /// Rebuild A as L·Lᵗ
    pub fn reconstruct(&self) -> Array2<f64> {
        self.l.dot(&self.lt)
    }
}
