//! Triangular solvers
//!
//! Forward and backward substitution shared by the Cholesky and LU paths.
//! Both run in O(n²) and assume a nonzero diagonal.

use crate::error::{DecompositionError, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};
use num_traits::Float;

/// The triangular factor must be square with the same order as the right-hand side.
fn check_shape<T>(m: &ArrayView2<T>, b: &ArrayView1<T>) -> Result<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(DecompositionError::NotSquare { rows, cols });
    }
    if b.len() != rows {
        return Err(DecompositionError::DimensionMismatch {
            expected: rows,
            got: b.len(),
        });
    }
    Ok(rows)
}

/// Solve `L x = b` for lower-triangular `L` by forward substitution.
///
/// Entries above the diagonal of `l` are never read.
pub fn forward_substitution<T: Float>(l: ArrayView2<T>, b: ArrayView1<T>) -> Result<Array1<T>> {
    let n = check_shape(&l, &b)?;

    let mut x = Array1::from_elem(n, T::zero());
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - l[[i, j]] * x[j];
        }
        x[i] = sum / l[[i, i]];
    }
    Ok(x)
}

/// Solve `U x = b` for upper-triangular `U` by backward substitution.
///
/// Entries below the diagonal of `u` are never read.
pub fn backward_substitution<T: Float>(u: ArrayView2<T>, b: ArrayView1<T>) -> Result<Array1<T>> {
    let n = check_shape(&u, &b)?;

    let mut x = Array1::from_elem(n, T::zero());
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - u[[i, j]] * x[j];
        }
        x[i] = sum / u[[i, i]];
    }
    Ok(x)
}
