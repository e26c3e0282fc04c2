//! Root-finding algorithms.
//!
//! Newton-Raphson is the only solver the valuation core needs: bond yields
//! and spreads are smooth and monotone in the unknown, and every caller has
//! a good starting point (the issuance rate or a zero spread).
//!
//! The `try_` variants accept fallible objectives so that errors raised while
//! evaluating (a curve bump, a discount factor lookup) propagate unchanged.
//!
//! # Example
//!
//! ```rust
//! use tasa_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Yield of a 5% 5-year annual bond priced at 95
//! let pv = |y: f64| (1..=5).map(|t| 5.0 / (1.0 + y).powi(t)).sum::<f64>() + 100.0 / (1.0 + y).powi(5);
//! let dpv = |y: f64| {
//!     (1..=5).map(|t| -f64::from(t) * 5.0 / (1.0 + y).powi(t + 1)).sum::<f64>()
//!         - 500.0 / (1.0 + y).powi(6)
//! };
//!
//! let result = newton_raphson(|y| pv(y) - 95.0, dpv, 0.05, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod newton;

pub use newton::{newton_raphson, newton_raphson_numerical, try_newton_raphson, try_newton_raphson_numerical};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Step used for central-difference derivatives.
pub const NUMERICAL_DERIVATIVE_STEP: f64 = 1e-8;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on both the residual and the step size.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Objective value at the root.
    pub residual: f64,
}
