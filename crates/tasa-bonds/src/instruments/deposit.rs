//! Term deposit paying a single amount.

use std::fmt;

use tasa_core::daycounts::DayCountConvention;
use tasa_core::rates::{InterestConvention, Rate, RateConvention};
use tasa_core::types::{Currency, Date};

use crate::error::{BondError, BondResult};

/// Day base of the duration year fraction.
pub const DEFAULT_DURATION_BASE: u32 = 365;

/// A deposit paying `payment` on `payment_date`.
///
/// Deposits are quoted with a linear Actual rate over a base of 30 days for
/// CLP and 360 days for every other currency.
///
/// # Example
///
/// ```rust
/// use tasa_bonds::prelude::*;
/// use tasa_core::prelude::*;
///
/// let asof = Date::from_ymd(2024, 3, 1).unwrap();
/// let deposit = Deposit::new(Currency::CLP, Date::from_ymd(2024, 3, 31).unwrap(), 1_000_000.0).unwrap();
///
/// // 0.5% per 30 days over exactly 30 days
/// let value = deposit.value(asof, 0.005, 1.0).unwrap();
/// assert!((value - 1_000_000.0 / 1.005).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    name: Option<String>,
    currency: Currency,
    payment_date: Date,
    payment: f64,
}

impl Deposit {
    /// Creates a deposit.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if the payment is not finite.
    pub fn new(currency: Currency, payment_date: Date, payment: f64) -> BondResult<Self> {
        if !payment.is_finite() {
            return Err(BondError::invalid_spec(format!("deposit payment {payment} is not finite")));
        }
        Ok(Self {
            name: None,
            currency,
            payment_date,
            payment,
        })
    }

    /// Attaches an instrument identifier.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Instrument identifier, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Date of the single payment.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Amount paid at `payment_date`.
    #[must_use]
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Convention the deposit rate is quoted in.
    #[must_use]
    pub fn rate_convention(&self) -> RateConvention {
        let base = match self.currency {
            Currency::CLP => 30,
            _ => 360,
        };
        RateConvention::new(InterestConvention::Linear, DayCountConvention::Actual, base)
    }

    /// Payment discounted at `rate_value` to `asof`, times `fx`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoRemainingFlows` after the payment date.
    pub fn value(&self, asof: Date, rate_value: f64, fx: f64) -> BondResult<f64> {
        if asof > self.payment_date {
            return Err(BondError::NoRemainingFlows { date: asof });
        }
        let rate = Rate::new(self.rate_convention(), rate_value);
        Ok(self.payment * rate.discount_factor(asof, self.payment_date) * fx)
    }

    /// Calendar days to payment over a 365-day year.
    #[must_use]
    pub fn duration(&self, asof: Date) -> f64 {
        self.duration_with_base(asof, DEFAULT_DURATION_BASE)
    }

    /// Calendar days to payment over `base` days.
    #[must_use]
    pub fn duration_with_base(&self, asof: Date, base: u32) -> f64 {
        asof.days_between(&self.payment_date) as f64 / f64::from(base)
    }

    /// Value change for a one basis point rise, in the settlement currency.
    ///
    /// ```text
    /// dv01 = -(value / 100) * duration / 10_000 * payment
    /// ```
    pub fn dv01(&self, asof: Date, rate_value: f64) -> BondResult<f64> {
        let value = self.value(asof, rate_value, 1.0)?;
        Ok(-(value / 100.0) * self.duration(asof) / 10_000.0 * self.payment)
    }
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deposit({}{} {} on {})",
            self.name.as_deref().map(|n| format!("{n}: ")).unwrap_or_default(),
            self.payment,
            self.currency,
            self.payment_date
        )
    }
}
