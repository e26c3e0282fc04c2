//! Error types for the Tasa core crate.
//!
//! Covers the validation and domain failures raised by dates, calendars,
//! day counts and rate conventions.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type TasaResult<T> = Result<T, TasaError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TasaError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Two parallel input sequences have different lengths.
    #[error("Length mismatch: {left} vs {right} elements")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// Input outside the domain of a conversion (zero year fraction,
    /// non-positive wealth factor, non-finite value).
    #[error("Domain error: {reason}")]
    DomainError {
        /// Description of the degenerate input.
        reason: String,
    },

    /// Day count calculation error.
    #[error("Day count error: {reason}")]
    DayCountError {
        /// Description of the error.
        reason: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },

    /// A string could not be parsed into a convention or tenor.
    #[error("Cannot parse '{input}' as {kind}")]
    ParseError {
        /// The rejected input.
        input: String,
        /// What the input was expected to be.
        kind: &'static str,
    },

    /// A value could not be rounded to the requested precision.
    #[error("Rounding error: {reason}")]
    RoundingError {
        /// Description of the error.
        reason: String,
    },
}

impl TasaError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::DomainError {
            reason: reason.into(),
        }
    }

    /// Creates a day count error.
    #[must_use]
    pub fn day_count(reason: impl Into<String>) -> Self {
        Self::DayCountError {
            reason: reason.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(input: impl Into<String>, kind: &'static str) -> Self {
        Self::ParseError {
            input: input.into(),
            kind,
        }
    }
}
