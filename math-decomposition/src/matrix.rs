//! Square matrix with an eagerly cached factorization
//!
//! [`DecomposableMatrix`] owns an n×n matrix and computes exactly one
//! factorization at construction: Cholesky when the matrix is symmetric
//! positive-definite, LU with partial pivoting otherwise. Every
//! [`solve`](DecomposableMatrix::solve) reuses that factorization and only
//! runs the two triangular substitutions, so the O(n³) cost is paid once
//! and each right-hand side costs O(n²).
//!
//! # Example
//!
//! ```
//! use math_audio_decomposition::{DecomposableMatrix, DecompositionKind};
//! use ndarray::array;
//!
//! let a = DecomposableMatrix::new(array![[4.0, 1.0], [1.0, 3.0]]).unwrap();
//! assert_eq!(a.kind(), DecompositionKind::Cholesky);
//!
//! let x = a.solve(&[1.0, 2.0]).unwrap();
//! assert!((x[0] - 1.0 / 11.0).abs() < 1e-12);
//! ```

use crate::config::{DecompositionConfig, Strategy};
use crate::direct::{CholeskyFactorization, LuFactorization, is_positive_definite};
use crate::error::{DecompositionError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::fmt;
use std::ops::Index;

/// Which factorization a [`DecomposableMatrix`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionKind {
    /// A = L·Lᵗ
    Cholesky,
    /// P·A = L·U
    Lu,
}

impl fmt::Display for DecompositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompositionKind::Cholesky => write!(f, "Cholesky"),
            DecompositionKind::Lu => write!(f, "LU"),
        }
    }
}

/// The cached factorization: exactly one of the two is ever present
#[derive(Debug, Clone)]
pub enum Decomposition {
    /// Symmetric positive-definite path
    Cholesky(CholeskyFactorization),
    /// Partial-pivoting path
    Lu(LuFactorization),
}

impl Decomposition {
    /// Select and compute a factorization of `a` according to `config`.
    pub fn compute(a: ArrayView2<f64>, config: &DecompositionConfig) -> Result<Self> {
        let (rows, cols) = a.dim();
        if rows != cols {
            return Err(DecompositionError::NotSquare { rows, cols });
        }

        let decomposition = match config.strategy {
            Strategy::Auto => {
                if is_positive_definite(a) {
                    Decomposition::Cholesky(factorize_certified(a)?)
                } else {
                    Decomposition::Lu(LuFactorization::factorize(a)?)
                }
            }
            Strategy::Cholesky => {
                if !is_positive_definite(a) {
                    return Err(DecompositionError::NotPositiveDefinite);
                }
                Decomposition::Cholesky(factorize_certified(a)?)
            }
            Strategy::Lu => Decomposition::Lu(LuFactorization::factorize(a)?),
        };

        if config.verbosity > 0 {
            log::info!(
                "Factorized {}x{} matrix with {} (det = {:.6e})",
                rows,
                cols,
                decomposition.kind(),
                decomposition.determinant()
            );
        }

        Ok(decomposition)
    }

    /// Which path was taken
    pub fn kind(&self) -> DecompositionKind {
        match self {
            Decomposition::Cholesky(_) => DecompositionKind::Cholesky,
            Decomposition::Lu(_) => DecompositionKind::Lu,
        }
    }

    /// Determinant of the factorized matrix
    pub fn determinant(&self) -> f64 {
        match self {
            Decomposition::Cholesky(chol) => chol.determinant(),
            Decomposition::Lu(lu) => lu.determinant(),
        }
    }

    /// Rebuild the factorized matrix from its factors
    pub fn reconstruct(&self) -> Array2<f64> {
        match self {
            Decomposition::Cholesky(chol) => chol.reconstruct(),
            Decomposition::Lu(lu) => lu.reconstruct(),
        }
    }

    /// Solve one right-hand side against the cached factors.
    fn substitute(&self, b: ArrayView1<f64>, verbosity: usize) -> Result<Array1<f64>> {
        match self {
            Decomposition::Cholesky(chol) => chol.solve_traced(b, verbosity),
            Decomposition::Lu(lu) => lu.solve_traced(b, verbosity),
        }
    }
}

/// Cholesky factorization of a matrix `is_positive_definite` already accepted.
///
/// A failure here means the positive-definiteness check and the factorizer
/// disagree; it is logged as an error before being returned.
fn factorize_certified(a: ArrayView2<f64>) -> Result<CholeskyFactorization> {
    CholeskyFactorization::factorize(a).inspect_err(|err| {
        if err.is_internal() {
            log::error!("positive-definite matrix failed to factorize: {}", err);
        }
    })
}

/// Square matrix with its factorization computed at construction.
///
/// The factorization is never stale: [`set`](Self::set) refactorizes before
/// returning, and there is no other way to mutate the stored entries.
#[derive(Debug, Clone)]
pub struct DecomposableMatrix {
    matrix: Array2<f64>,
    decomposition: Decomposition,
    config: DecompositionConfig,
}

impl DecomposableMatrix {
    /// Factorize `matrix` with the default (probe-driven) configuration.
    pub fn new(matrix: Array2<f64>) -> Result<Self> {
        Self::with_config(matrix, &DecompositionConfig::default())
    }

    /// Factorize `matrix` with an explicit configuration.
    pub fn with_config(matrix: Array2<f64>, config: &DecompositionConfig) -> Result<Self> {
        let decomposition = Decomposition::compute(matrix.view(), config)?;
        Ok(Self {
            matrix,
            decomposition,
            config: config.clone(),
        })
    }

    /// Build from a list of rows; every row must have as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(DecompositionError::RaggedRows {
                row,
                expected: cols,
                got: r.len(),
            });
        }
        if cols != n {
            return Err(DecompositionError::NotSquare { rows: n, cols });
        }

        Self::new(Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Entry at `(row, col)`, or `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.matrix.get([row, col]).copied()
    }

    /// Overwrite one entry and refactorize.
    ///
    /// If the updated matrix cannot be factorized (for instance it became
    /// singular), the entry is restored, the previous factorization is kept
    /// and the error is returned.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let n = self.rows();
        let Some(entry) = self.matrix.get_mut([row, col]) else {
            return Err(DecompositionError::IndexOutOfBounds { row, col, n });
        };
        let previous = std::mem::replace(entry, value);

        match Decomposition::compute(self.matrix.view(), &self.config) {
            Ok(decomposition) => {
                self.decomposition = decomposition;
                Ok(())
            }
            Err(err) => {
                self.matrix[[row, col]] = previous;
                Err(err)
            }
        }
    }

    /// Read-only view of the stored matrix
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    /// The cached factorization
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    /// Which factorization was selected
    pub fn kind(&self) -> DecompositionKind {
        self.decomposition.kind()
    }

    /// Determinant of the matrix, from the cached factors
    pub fn determinant(&self) -> f64 {
        self.decomposition.determinant()
    }

    /// Solve A·x = b using the cached factorization.
    ///
    /// Accepts slices, vectors, owned arrays and array views.
    pub fn solve<'a, B>(&self, b: B) -> Result<Array1<f64>>
    where
        B: Into<ArrayView1<'a, f64>>,
    {
        self.decomposition.substitute(b.into(), self.config.verbosity)
    }

    /// Like [`solve`](Self::solve), but a missing right-hand side is an error
    /// instead of a type error.
    pub fn try_solve<'a, B>(&self, b: Option<B>) -> Result<Array1<f64>>
    where
        B: Into<ArrayView1<'a, f64>>,
    {
        match b {
            Some(b) => self.solve(b),
            None => Err(DecompositionError::MissingArgument),
        }
    }

    /// Solve A·X = B column by column, reusing the factorization.
    pub fn solve_many(&self, b: ArrayView2<f64>) -> Result<Array2<f64>> {
        let n = self.rows();
        if b.nrows() != n {
            return Err(DecompositionError::DimensionMismatch {
                expected: n,
                got: b.nrows(),
            });
        }

        let mut x = Array2::<f64>::zeros(b.raw_dim());
        for (j, column) in b.columns().into_iter().enumerate() {
            let xj = self.decomposition.substitute(column, self.config.verbosity)?;
            x.column_mut(j).assign(&xj);
        }
        Ok(x)
    }

    /// max_i |(A·x)[i] − b[i]|
    pub fn residual_norm(&self, x: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
        let n = self.rows();
        for len in [x.len(), b.len()] {
            if len != n {
                return Err(DecompositionError::DimensionMismatch { expected: n, got: len });
            }
        }
        let ax = self.matrix.dot(&x);
        Ok(ax
            .iter()
            .zip(b.iter())
            .map(|(lhs, rhs)| (lhs - rhs).abs())
            .fold(0.0, f64::max))
    }
}

impl Index<(usize, usize)> for DecomposableMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.matrix[[row, col]]
    }
}

/// n×n Hilbert matrix, H[i,j] = 1 / (i + j + 1)
///
/// Symmetric positive-definite but badly conditioned; handy for stress tests.
pub fn hilbert(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| 1.0 / (i + j + 1) as f64)
}
