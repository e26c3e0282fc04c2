//! Coupon periods of an amortizing bond.
//!
//! A [`Coupon`] is one accrual period: the outstanding residual at its
//! start, the amortization and interest paid at its end, and the dates
//! bounding it. Each coupon carries the simple rate its own interest
//! implies, quoted Linear/Actual/360.

use serde::{Deserialize, Serialize};
use std::fmt;

use tasa_core::rates::{Rate, RateConvention};
use tasa_core::types::Date;

use crate::error::{BondError, BondResult};

/// One accrual period of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    amortization: f64,
    interest: f64,
    residual: f64,
    start: Date,
    end: Date,
    rate: Rate,
}

impl Coupon {
    /// Creates a coupon and derives its Linear/Actual/360 rate.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidCoupon` unless `start < end`, every amount is
    /// finite, `residual > 0` and `residual >= amortization`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tasa_bonds::Coupon;
    /// use tasa_core::types::Date;
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    /// let coupon = Coupon::new(0.0, 2.5, 100.0, start, end).unwrap();
    ///
    /// // 2.5% over 182 days, annualized on 360
    /// assert!((coupon.rate().value - 0.025 * 360.0 / 182.0).abs() < 1e-12);
    /// ```
    pub fn new(amortization: f64, interest: f64, residual: f64, start: Date, end: Date) -> BondResult<Self> {
        Self::with_convention(amortization, interest, residual, start, end, RateConvention::linear_act_360())
    }

    /// Creates a coupon whose rate is quoted under `convention`.
    pub fn with_convention(
        amortization: f64,
        interest: f64,
        residual: f64,
        start: Date,
        end: Date,
        convention: RateConvention,
    ) -> BondResult<Self> {
        if start >= end {
            return Err(BondError::invalid_coupon(format!(
                "start {start} is not before end {end}"
            )));
        }
        for (name, value) in [("amortization", amortization), ("interest", interest), ("residual", residual)] {
            if !value.is_finite() {
                return Err(BondError::invalid_coupon(format!("{name} is not finite: {value}")));
            }
        }
        if residual <= 0.0 {
            return Err(BondError::invalid_coupon(format!("residual must be positive, got {residual}")));
        }
        if residual < amortization {
            return Err(BondError::invalid_coupon(format!(
                "residual {residual} is below amortization {amortization}"
            )));
        }

        let wealth_factor = (interest + residual) / residual;
        let rate = Rate::from_wealth_factor(wealth_factor, convention, start, end)?;

        Ok(Self {
            amortization,
            interest,
            residual,
            start,
            end,
            rate,
        })
    }

    /// Principal repaid at the end of the period.
    #[must_use]
    pub fn amortization(&self) -> f64 {
        self.amortization
    }

    /// Interest paid at the end of the period.
    #[must_use]
    pub fn interest(&self) -> f64 {
        self.interest
    }

    /// Principal outstanding during the period.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// First day of accrual.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Payment date.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Rate implied by the coupon's own interest.
    #[must_use]
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Cash paid at the end of the period.
    #[must_use]
    pub fn flow(&self) -> f64 {
        self.amortization + self.interest
    }

    /// True when `date` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// Interest accrued on the residual from the start to `date` at `rate`.
    #[must_use]
    pub fn accrued_interest(&self, date: Date, rate: &Rate) -> f64 {
        rate.accrued_interest(self.residual, self.start, date)
    }

    /// Interest accrued at the coupon's own rate.
    #[must_use]
    pub fn accrued_coupon_interest(&self, date: Date) -> f64 {
        self.accrued_interest(date, &self.rate)
    }

    /// Same period with every amount multiplied by `factor`; the rate is unchanged.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            amortization: self.amortization * factor,
            interest: self.interest * factor,
            residual: self.residual * factor,
            ..*self
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coupon({} -> {}, amort {}, interest {}, residual {})",
            self.start, self.end, self.amortization, self.interest, self.residual
        )
    }
}
