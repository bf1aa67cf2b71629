//! Direct solvers for dense linear systems
//!
//! This module provides the factorizations behind [`DecomposableMatrix`](crate::DecomposableMatrix):
//! - [`is_positive_definite`]: trial Cholesky elimination used to pick a path
//! - [`CholeskyFactorization`]: A = L·Lᵗ for symmetric positive-definite systems
//! - [`LuFactorization`]: P·A = L·U with partial pivoting for everything else
//! - [`forward_substitution`] / [`backward_substitution`]: triangular solves shared by both

mod cholesky;
mod lu;
mod probe;
mod triangular;

pub use cholesky::CholeskyFactorization;
pub use lu::LuFactorization;
pub use probe::{is_positive_definite, is_symmetric};
pub use triangular::{backward_substitution, forward_substitution};
