//! Error types for bond operations.

use tasa_core::types::Date;
use tasa_core::TasaError;
use tasa_curves::CurveError;
use tasa_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// A coupon's own fields are inconsistent.
    #[error("Invalid coupon: {reason}")]
    InvalidCoupon {
        /// Description of what's invalid.
        reason: String,
    },

    /// The coupon sequence or bond terms are inconsistent.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// A residual does not match the amortizations still to be paid.
    #[error("Residual {residual} of coupon {index} does not match remaining amortization {expected}")]
    ResidualMismatch {
        /// Position of the coupon in the sorted schedule.
        index: usize,
        /// Residual carried by the coupon.
        residual: f64,
        /// Sum of this and later amortizations.
        expected: f64,
    },

    /// No coupon accrues on the requested date.
    #[error("No coupon accrues on {date}")]
    NoCurrentCoupon {
        /// Requested date.
        date: Date,
    },

    /// Every flow is paid on or before the requested date.
    #[error("No flows after {date}")]
    NoRemainingFlows {
        /// Requested date.
        date: Date,
    },

    /// The settlement amount correction did not bracket the target.
    #[error("Amount correction did not flip sign after {steps} steps (rate {rate}, error {error})")]
    CorrectionFailed {
        /// Steps taken.
        steps: u32,
        /// Last rate tried.
        rate: f64,
        /// Amount error at that rate.
        error: f64,
    },

    /// A required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Invalid pricing configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] TasaError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Solver error.
    #[error("Solver error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid coupon error.
    #[must_use]
    pub fn invalid_coupon(reason: impl Into<String>) -> Self {
        Self::InvalidCoupon {
            reason: reason.into(),
        }
    }

    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True when an iterative routine ran out of steps.
    #[must_use]
    pub fn is_convergence_failure(&self) -> bool {
        match self {
            Self::CorrectionFailed { .. } => true,
            Self::Math(err) => err.is_convergence_failure(),
            _ => false,
        }
    }
}
