//! Curve anchor points.

use serde::{Deserialize, Serialize};
use std::fmt;

use tasa_core::rates::Rate;
use tasa_core::types::Date;

/// A dated zero rate anchoring a [`ZeroCouponCurve`](crate::ZeroCouponCurve).
///
/// The rate accrues from the curve date to `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroCouponCurvePoint {
    /// Maturity of the zero rate.
    pub date: Date,
    /// Zero rate from the curve date to `date`.
    pub rate: Rate,
}

impl ZeroCouponCurvePoint {
    /// Creates a new anchor point.
    #[must_use]
    pub const fn new(date: Date, rate: Rate) -> Self {
        Self { date, rate }
    }

    /// Same date, rate shifted by `bps` basis points.
    #[must_use]
    pub fn shifted_bps(&self, bps: f64) -> Self {
        Self::new(self.date, self.rate.shifted_bps(bps))
    }
}

impl fmt::Display for ZeroCouponCurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.rate)
    }
}
