//! Factorization configuration

/// Which factorization to compute at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Probe for positive-definiteness, then pick Cholesky or LU
    #[default]
    Auto,
    /// Require Cholesky; fails with `NotPositiveDefinite` if the probe rejects the matrix
    Cholesky,
    /// Skip the probe and always use LU with partial pivoting
    Lu,
}

/// Decomposition configuration
#[derive(Debug, Clone)]
pub struct DecompositionConfig {
    /// Factorization selection policy
    pub strategy: Strategy,
    /// Verbosity level (0 = quiet, 1 = summary, 2+ = solve intermediates)
    pub verbosity: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            verbosity: 0,
        }
    }
}

impl DecompositionConfig {
    /// Configuration with the given strategy and default verbosity
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
