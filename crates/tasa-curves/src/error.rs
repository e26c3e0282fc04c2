//! Error types for curve operations.

use tasa_core::types::Date;
use tasa_core::TasaError;
use tasa_math::MathError;
use thiserror::Error;

use crate::interpolation::InterpolationType;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough anchor points.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// An anchor point is dated on or before the curve date.
    #[error("Point date {date} is not after curve date {curve_date}")]
    PointNotAfterCurveDate {
        /// Offending point date.
        date: Date,
        /// Curve date.
        curve_date: Date,
    },

    /// Two anchor points share a date.
    #[error("Duplicate point at {date}")]
    DuplicatePoint {
        /// Repeated date.
        date: Date,
    },

    /// No anchor point at the requested date.
    #[error("No point at {date}")]
    PointNotFound {
        /// Requested date.
        date: Date,
    },

    /// Deleting the requested point would leave the curve empty.
    #[error("Cannot delete the last point at {date}")]
    LastPoint {
        /// Date of the remaining point.
        date: Date,
    },

    /// A forward curve must start after the curve date.
    #[error("Forward date {forward_date} is not after curve date {curve_date}")]
    InvalidForwardDate {
        /// Requested forward date.
        forward_date: Date,
        /// Curve date.
        curve_date: Date,
    },

    /// A discount factor or rate is not finite or not positive.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why the value is invalid.
        reason: String,
    },

    /// The interpolation scheme cannot be used on the requested values.
    #[error("{kind} interpolation is not supported for {target}")]
    UnsupportedInterpolation {
        /// Requested scheme.
        kind: InterpolationType,
        /// Values the scheme was requested for.
        target: &'static str,
    },

    /// Error from the core crate (conventions, batch lengths).
    #[error(transparent)]
    Core(#[from] TasaError),

    /// Error from the interpolation layer.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a length mismatch error for paired date batches.
    #[must_use]
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::Core(TasaError::length_mismatch(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_lower_errors() {
        let err: CurveError = MathError::insufficient_data(2, 1).into();
        assert_eq!(err.to_string(), "Insufficient data: need at least 2, got 1");

        let err = CurveError::length_mismatch(3, 2);
        assert!(matches!(err, CurveError::Core(TasaError::LengthMismatch { left: 3, right: 2 })));
    }

    #[test]
    fn test_display() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        let err = CurveError::PointNotAfterCurveDate {
            date,
            curve_date: date,
        };
        assert_eq!(err.to_string(), "Point date 2024-01-01 is not after curve date 2024-01-01");
    }
}
