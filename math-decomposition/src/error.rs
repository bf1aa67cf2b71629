//! Error types for dense factorization and solve.
//!
//! Every failure is surfaced synchronously to the caller of the operation
//! that triggered it; nothing is retried or downgraded to a default value.

use thiserror::Error;

/// Errors that can occur while factorizing or solving with a [`DecomposableMatrix`].
///
/// [`DecomposableMatrix`]: crate::DecomposableMatrix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecompositionError {
    /// The matrix handed to the constructor is not square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows provided
        rows: usize,
        /// Number of columns provided
        cols: usize,
    },

    /// A row-list input contains a row whose length differs from the row count.
    #[error("row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        /// Index of the offending row
        row: usize,
        /// Expected row length
        expected: usize,
        /// Actual row length
        got: usize,
    },

    /// Right-hand side length disagrees with the matrix order.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Matrix order
        expected: usize,
        /// Length of the right-hand side
        got: usize,
    },

    /// No right-hand side was supplied.
    #[error("missing right-hand side vector")]
    MissingArgument,

    /// Partial pivoting found an all-zero pivot column.
    #[error("matrix is singular: zero pivot in column {column}")]
    SingularMatrix {
        /// Pivot column where elimination stopped
        column: usize,
    },

    /// Cholesky was requested explicitly for a matrix that is not symmetric positive-definite.
    #[error("matrix is not symmetric positive-definite")]
    NotPositiveDefinite,

    /// Cholesky elimination produced a non-positive pivot after the probe accepted the matrix.
    #[error("cholesky invariant violated: pivot {pivot} at row {row} is not positive")]
    FactorizationInvariant {
        /// Row of the failing diagonal
        row: usize,
        /// Offending diagonal sum
        pivot: f64,
    },

    /// Element access outside the `n x n` matrix.
    #[error("index ({row}, {col}) out of bounds for {n}x{n} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix order
        n: usize,
    },
}

/// A specialized `Result` type for decomposition operations.
pub type Result<T> = std::result::Result<T, DecompositionError>;

impl DecompositionError {
    /// Returns `true` for shape-related errors.
    ///
    /// This includes `NotSquare`, `RaggedRows` and `DimensionMismatch`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            DecompositionError::NotSquare { .. }
                | DecompositionError::RaggedRows { .. }
                | DecompositionError::DimensionMismatch { .. }
        )
    }

    /// Returns `true` if the error signals an internal inconsistency rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, DecompositionError::FactorizationInvariant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecompositionError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "matrix must be square, got 2x3");

        let err = DecompositionError::SingularMatrix { column: 1 };
        assert_eq!(err.to_string(), "matrix is singular: zero pivot in column 1");
    }

    #[test]
    fn test_is_dimension_error() {
        assert!(DecompositionError::NotSquare { rows: 1, cols: 2 }.is_dimension_error());
        assert!(
            DecompositionError::DimensionMismatch {
                expected: 3,
                got: 2
            }
            .is_dimension_error()
        );
        assert!(!DecompositionError::MissingArgument.is_dimension_error());
        assert!(!DecompositionError::SingularMatrix { column: 0 }.is_dimension_error());
    }

    #[test]
    fn test_is_internal() {
        let err = DecompositionError::FactorizationInvariant {
            row: 2,
            pivot: -1e-17,
        };
        assert!(err.is_internal());
        assert!(!DecompositionError::NotPositiveDefinite.is_internal());
    }
}
