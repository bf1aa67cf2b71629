//! LU decomposition solver
//!
//! Provides LU factorization with partial pivoting for dense matrices that are
//! not symmetric positive-definite. Produces P·A = L·U with L unit lower
//! triangular, U upper triangular and P a row permutation.

use super::triangular::{backward_substitution, forward_substitution};
use crate::error::{DecompositionError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// LU factorization result
///
/// Stores L and U separately along with the pivot permutation.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Unit lower triangular factor
    l: Array2<f64>,
    /// Upper triangular factor
    u: Array2<f64>,
    /// `pivots[i]` is the original row moved to row `i`
    pivots: Vec<usize>,
    /// Permutation matrix with P·A = L·U
    permutation: Array2<f64>,
    /// Parity of the permutation (+1 or -1)
    det_sign: f64,
}

impl LuFactorization {
    /// Compute LU factorization with partial pivoting
    pub fn factorize(a: ArrayView2<f64>) -> Result<Self> {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(DecompositionError::NotSquare {
                rows: n,
                cols: a.ncols(),
            });
        }

        let mut l = Array2::<f64>::eye(n);
        let mut u = a.to_owned();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut det_sign = 1.0;

        for k in 0..n.saturating_sub(1) {
            // Find pivot, first maximum wins on ties
            let mut max_val = u[[k, k]].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = u[[i, k]].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            // Zero (or NaN) pivot column
            if max_val.is_nan() || max_val == 0.0 {
                return Err(DecompositionError::SingularMatrix { column: k });
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                det_sign = -det_sign;
                for j in 0..k {
                    l.swap([k, j], [max_row, j]);
                }
                for j in 0..n {
                    u.swap([k, j], [max_row, j]);
                }
            }

            // Compute multipliers and eliminate
            let pivot = u[[k, k]];
            for i in (k + 1)..n {
                let mult = u[[i, k]] / pivot;
                l[[i, k]] = mult;
                u[[i, k]] = 0.0;
                for j in (k + 1)..n {
                    let update = mult * u[[k, j]];
                    u[[i, j]] -= update;
                }
            }
        }

        // The loop never pivots on the last column
        if n > 0 && (u[[n - 1, n - 1]].is_nan() || u[[n - 1, n - 1]] == 0.0) {
            return Err(DecompositionError::SingularMatrix { column: n - 1 });
        }

        let mut permutation = Array2::<f64>::zeros((n, n));
        for (i, &p) in pivots.iter().enumerate() {
            permutation[[i, p]] = 1.0;
        }

        Ok(Self {
            l,
            u,
            pivots,
            permutation,
            det_sign,
        })
    }

    /// Matrix order
    pub fn n(&self) -> usize {
        self.pivots.len()
    }

    /// Unit lower triangular factor L
    pub fn l(&self) -> &Array2<f64> {
        &self.l
    }

    /// Upper triangular factor U
    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    /// Row permutation π: solve-row `i` reads original row `pivots()[i]`
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Permutation matrix P such that P·A = L·U
    pub fn permutation(&self) -> &Array2<f64> {
        &self.permutation
    }

    /// Parity of the permutation, ±1
    pub fn det_sign(&self) -> f64 {
        self.det_sign
    }

    /// Apply the row permutation: `b'[i] = b[π[i]]`
    pub fn permute(&self, b: ArrayView1<f64>) -> Array1<f64> {
        self.pivots.iter().map(|&p| b[p]).collect()
    }

    /// Solve `L y = b'` (forward) and return `y`
    pub fn forward(&self, b: ArrayView1<f64>) -> Result<Array1<f64>> {
        forward_substitution(self.l.view(), b)
    }

    /// Solve `U x = y` (backward) and return `x`
    pub fn backward(&self, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        backward_substitution(self.u.view(), y)
    }

    /// Solve Ax = b using the pre-computed LU factorization
    pub fn solve(&self, b: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.solve_traced(b, 0)
    }

    /// Solve, logging the intermediate vectors when `verbosity > 1`
    pub(crate) fn solve_traced(&self, b: ArrayView1<f64>, verbosity: usize) -> Result<Array1<f64>> {
        if b.len() != self.n() {
            return Err(DecompositionError::DimensionMismatch {
                expected: self.n(),
                got: b.len(),
            });
        }

        let permuted = self.permute(b);
        let y = self.forward(permuted.view())?;
        let x = self.backward(y.view())?;
        if verbosity > 1 {
            log::debug!("[LU] permuted rhs = {}", permuted);
            log::debug!("[LU] forward y = {}", y);
            log::debug!("[LU] backward x = {}", x);
        }
        Ok(x)
    }

    /// det(A) = sign(P) · Π U[i,i]
    pub fn determinant(&self) -> f64 {
        self.det_sign * self.u.diag().iter().product::<f64>()
    }

    /// Rebuild A as Pᵗ·L·U
    pub fn reconstruct(&self) -> Array2<f64> {
        self.permutation.t().dot(&self.l.dot(&self.u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn assert_matrix_eq(a: &Array2<f64>, b: &Array2<f64>, epsilon: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = epsilon);
        }
    }

    #[test]
    fn test_lu_solve_real() {
        let a = array![[1.0, 2.0, 3.0], [2.0, 5.0, 3.0], [1.0, 0.0, 8.0]];
        let b = array![14.0, 18.0, 20.0];

        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        let x = lu.solve(b.view()).expect("LU solve should succeed");

        // Verify: Ax = b
        let ax = a.dot(&x);
        for i in 0..3 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-10);
        }
        assert_relative_eq!(x[0], -92.0, epsilon = 1e-9);
        assert_relative_eq!(x[1], 32.0, epsilon = 1e-9);
        assert_relative_eq!(x[2], 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lu_pa_equals_lu() {
        let a = array![[1.0, 2.0, 3.0], [2.0, 5.0, 3.0], [1.0, 0.0, 8.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");

        let pa = lu.permutation().dot(&a);
        let l_times_u = lu.l().dot(lu.u());
        assert_matrix_eq(&pa, &l_times_u, 1e-12);
        assert_matrix_eq(&lu.reconstruct(), &a, 1e-12);
    }

    #[test]
    fn test_lu_factor_shapes() {
        let a = array![[0.0, 2.0, 1.0], [3.0, 1.0, 0.0], [1.0, 1.0, 1.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");

        for i in 0..3 {
            assert_eq!(lu.l()[[i, i]], 1.0);
            for j in (i + 1)..3 {
                assert_eq!(lu.l()[[i, j]], 0.0);
            }
            for j in 0..i {
                assert_eq!(lu.u()[[i, j]], 0.0);
                assert!(lu.l()[[i, j]].abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_lu_pivots_bijection() {
        let a = array![[0.0, 2.0, 1.0], [3.0, 1.0, 0.0], [1.0, 1.0, 1.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");

        let mut seen = lu.pivots().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
        // Column 0 pivots on the 3.0 in row 1
        assert_eq!(lu.pivots()[0], 1);
    }

    #[test]
    fn test_lu_tie_first_occurrence() {
        let a = array![[1.0, 1.0], [-1.0, 2.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        assert_eq!(lu.pivots(), &[0, 1]);
        assert_eq!(lu.det_sign(), 1.0);
    }

    #[test]
    fn test_lu_determinant() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        assert_eq!(lu.det_sign(), -1.0);
        assert_relative_eq!(lu.determinant(), -1.0);

        let a = array![[1.0, 2.0, 3.0], [2.0, 5.0, 3.0], [1.0, 0.0, 8.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        assert_relative_eq!(lu.determinant(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_singular() {
        let a = array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 2.0, 3.0]];
        let result = LuFactorization::factorize(a.view());
        assert!(matches!(
            result,
            Err(DecompositionError::SingularMatrix { column: 1 })
        ));
    }

    #[test]
    fn test_lu_singular_last_pivot() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let result = LuFactorization::factorize(a.view());
        assert!(matches!(
            result,
            Err(DecompositionError::SingularMatrix { column: 1 })
        ));
    }

    #[test]
    fn test_lu_single_entry() {
        let a = array![[-5.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        assert_eq!(lu.l(), &array![[1.0]]);
        assert_eq!(lu.u(), &array![[-5.0]]);
        assert_eq!(lu.permutation(), &array![[1.0]]);

        let x = lu.solve(array![10.0].view()).expect("solve should succeed");
        assert_relative_eq!(x[0], -2.0);

        let zero = array![[0.0]];
        assert!(matches!(
            LuFactorization::factorize(zero.view()),
            Err(DecompositionError::SingularMatrix { column: 0 })
        ));
    }

    #[test]
    fn test_lu_multiple_rhs() {
        let a = array![[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]];
        let lu = LuFactorization::factorize(a.view()).expect("Factorization should succeed");

        // Solve multiple RHS
        for b in [array![5.0, -2.0, 9.0], array![1.0, 0.0, 0.0]] {
            let x = lu.solve(b.view()).expect("Solve should succeed");
            let ax = a.dot(&x);
            for i in 0..3 {
                assert_relative_eq!(ax[i], b[i], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_lu_dimension_mismatch() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let lu = LuFactorization::factorize(a.view()).expect("LU should succeed");
        assert!(matches!(
            lu.solve(array![1.0].view()),
            Err(DecompositionError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_lu_not_square() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(matches!(
            LuFactorization::factorize(a.view()),
            Err(DecompositionError::NotSquare { rows: 2, cols: 3 })
        ));
    }
}
