//! Dense linear solves with automatic factorization selection
//!
//! This crate solves square real systems A·x = b. At construction a
//! [`DecomposableMatrix`] probes its matrix and caches exactly one
//! factorization:
//!
//! - **Cholesky** (A = L·Lᵗ) when A is symmetric positive-definite
//! - **LU with partial pivoting** (P·A = L·U) otherwise
//!
//! Each call to [`DecomposableMatrix::solve`] then only runs a forward and a
//! backward substitution against the cached factors.
//!
//! # Example
//!
//! ```
//! use math_audio_decomposition::{DecomposableMatrix, DecompositionError, DecompositionKind};
//! use ndarray::array;
//!
//! let a = DecomposableMatrix::new(array![[1.0, 2.0, 3.0], [2.0, 5.0, 3.0], [1.0, 0.0, 8.0]])?;
//! assert_eq!(a.kind(), DecompositionKind::Lu);
//!
//! let x = a.solve(&[14.0, 18.0, 20.0])?;
//! assert!((x[0] + 92.0).abs() < 1e-9);
//!
//! let singular = DecomposableMatrix::new(array![[1.0, 2.0], [2.0, 4.0]]);
//! assert!(matches!(singular, Err(DecompositionError::SingularMatrix { .. })));
//! # Ok::<(), DecompositionError>(())
//! ```

pub mod config;
pub mod direct;
pub mod error;
pub mod matrix;

pub use config::{DecompositionConfig, Strategy};
pub use error::{DecompositionError, Result};
pub use matrix::{DecomposableMatrix, Decomposition, DecompositionKind, hilbert};

// Re-export direct solvers
pub use direct::{
    CholeskyFactorization, LuFactorization, backward_substitution, forward_substitution,
    is_positive_definite, is_symmetric,
};
