//! Rate value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RateConvention;
use crate::error::TasaResult;
use crate::types::Date;

/// An interest rate quoted under a [`RateConvention`].
///
/// `Rate` is an immutable value: conversion returns a new `Rate`.
///
/// # Example
///
/// ```rust
/// use tasa_core::prelude::*;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 1, 1).unwrap();
/// let rate = Rate::new(RateConvention::default(), 0.05);
///
/// let wf = rate.wealth_factor(start, end);
/// assert!((wf - 1.05_f64.powf(366.0 / 365.0)).abs() < 1e-15);
/// assert!((rate.accrued_interest(100.0, start, end) - 100.0 * (wf - 1.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Quoting convention.
    pub convention: RateConvention,
    /// Rate value as a decimal fraction (0.05 = 5%).
    pub value: f64,
}

impl Rate {
    /// Creates a new rate.
    #[must_use]
    pub const fn new(convention: RateConvention, value: f64) -> Self {
        Self { convention, value }
    }

    /// Same convention, different value.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self::new(self.convention, value)
    }

    /// Same convention, value shifted by `bps` basis points.
    #[must_use]
    pub fn shifted_bps(&self, bps: f64) -> Self {
        self.with_value(self.value + bps / 10_000.0)
    }

    /// Wealth factor accrued from `start` to `end`.
    #[must_use]
    pub fn wealth_factor(&self, start: Date, end: Date) -> f64 {
        let t = self.convention.year_fraction(start, end);
        self.convention.interest.wealth_factor(self.value, t)
    }

    /// Wealth factors from `start` to each of `ends`.
    #[must_use]
    pub fn wealth_factors(&self, start: Date, ends: &[Date]) -> Vec<f64> {
        ends.iter().map(|&e| self.wealth_factor(start, e)).collect()
    }

    /// Discount factor from `end` back to `start`.
    #[must_use]
    pub fn discount_factor(&self, start: Date, end: Date) -> f64 {
        1.0 / self.wealth_factor(start, end)
    }

    /// Discount factors from each of `ends` back to `start`.
    #[must_use]
    pub fn discount_factors(&self, start: Date, ends: &[Date]) -> Vec<f64> {
        ends.iter().map(|&e| self.discount_factor(start, e)).collect()
    }

    /// Interest earned on `notional` from `start` to `end`.
    #[must_use]
    pub fn accrued_interest(&self, notional: f64, start: Date, end: Date) -> f64 {
        notional * (self.wealth_factor(start, end) - 1.0)
    }

    /// Derivative of the discount factor from `start` to `end` with respect to the rate value.
    #[must_use]
    pub fn discount_factor_derivative(&self, start: Date, end: Date) -> f64 {
        let t = self.convention.year_fraction(start, end);
        let wf = self.convention.interest.wealth_factor(self.value, t);
        -self.convention.interest.wealth_factor_derivative(self.value, t) / (wf * wf)
    }

    /// Equivalent rate under `convention` over the same dates.
    ///
    /// The returned rate reproduces this rate's wealth factor from `start`
    /// to `end`.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::DomainError` if the new convention yields a zero
    /// year fraction for the dates, or the wealth factor is outside its domain.
    pub fn convert(&self, convention: RateConvention, start: Date, end: Date) -> TasaResult<Rate> {
        let wf = self.wealth_factor(start, end);
        Self::from_wealth_factor(wf, convention, start, end)
    }

    /// Rate under `convention` whose wealth factor from `start` to `end` is `wealth_factor`.
    pub fn from_wealth_factor(
        wealth_factor: f64,
        convention: RateConvention,
        start: Date,
        end: Date,
    ) -> TasaResult<Rate> {
        let t = convention.year_fraction(start, end);
        let value = convention.interest.rate_from_wealth_factor(wealth_factor, t)?;
        Ok(Rate::new(convention, value))
    }

    /// Rate under `convention` whose discount factor from `end` to `start` is `discount_factor`.
    pub fn from_discount_factor(
        discount_factor: f64,
        convention: RateConvention,
        start: Date,
        end: Date,
    ) -> TasaResult<Rate> {
        let t = convention.year_fraction(start, end);
        let value = convention.interest.rate_from_discount_factor(discount_factor, t)?;
        Ok(Rate::new(convention, value))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}% {}", self.value * 100.0, self.convention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daycounts::DayCountConvention;
    use crate::rates::InterestConvention;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_linear_to_compounded_conversion() {
        // 3% Linear/Act/360 over 25 days, restated as Compounded/Act/365
        let start = d(2024, 3, 1);
        let end = d(2024, 3, 26);
        let rate = Rate::new(RateConvention::linear_act_360(), 0.03);

        let converted = rate.convert(RateConvention::default(), start, end).unwrap();
        let expected = (1.0 + 0.03 * 25.0 / 360.0_f64).powf(365.0 / 25.0) - 1.0;

        assert_eq!(converted.convention, RateConvention::default());
        assert_relative_eq!(converted.value, expected, epsilon = 1e-14);
        // The original rate is untouched
        assert_eq!(rate.value, 0.03);
    }

    #[test]
    fn test_conversion_preserves_wealth_factor() {
        let start = d(2024, 1, 31);
        let end = d(2026, 8, 31);
        let rate = Rate::new(
            RateConvention::new(InterestConvention::Exponential, DayCountConvention::Thirty360U, 360),
            0.047,
        );
        let target = RateConvention::new(InterestConvention::Linear, DayCountConvention::Thirty360EIsda, 365);
        let converted = rate.convert(target, start, end).unwrap();
        assert_relative_eq!(
            converted.wealth_factor(start, end),
            rate.wealth_factor(start, end),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_convert_same_day_fails() {
        let date = d(2024, 1, 1);
        let rate = Rate::new(RateConvention::default(), 0.05);
        assert!(rate.convert(RateConvention::linear_act_360(), date, date).is_err());
    }

    #[test]
    fn test_from_discount_factor() {
        let start = d(2024, 1, 1);
        let end = d(2025, 1, 1);
        let rate = Rate::from_discount_factor(0.95, RateConvention::default(), start, end).unwrap();
        assert_relative_eq!(rate.discount_factor(start, end), 0.95, epsilon = 1e-14);

        let rate = Rate::from_wealth_factor(1.10, RateConvention::linear_act_360(), start, end).unwrap();
        assert_relative_eq!(rate.value, 0.10 * 360.0 / 366.0, epsilon = 1e-14);
    }

    #[test]
    fn test_accrued_interest() {
        let start = d(2024, 1, 1);
        let end = d(2024, 7, 1);
        let rate = Rate::new(RateConvention::linear_act_360(), 0.06);
        assert_relative_eq!(
            rate.accrued_interest(1_000_000.0, start, end),
            1_000_000.0 * 0.06 * 182.0 / 360.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_batch_factors() {
        let start = d(2024, 1, 1);
        let ends = [d(2024, 6, 1), d(2025, 6, 1)];
        let rate = Rate::new(RateConvention::default(), 0.05);
        let dfs = rate.discount_factors(start, &ends);
        let wfs = rate.wealth_factors(start, &ends);
        for i in 0..2 {
            assert_eq!(dfs[i], rate.discount_factor(start, ends[i]));
            assert_relative_eq!(dfs[i] * wfs[i], 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_discount_factor_derivative() {
        let start = d(2024, 1, 1);
        let end = d(2027, 4, 15);
        let rate = Rate::new(RateConvention::default(), 0.05);
        let h = 1e-7;
        let numeric = (rate.with_value(0.05 + h).discount_factor(start, end)
            - rate.with_value(0.05 - h).discount_factor(start, end))
            / (2.0 * h);
        assert_relative_eq!(rate.discount_factor_derivative(start, end), numeric, epsilon = 1e-6);
    }

    #[test]
    fn test_shifted_bps() {
        let rate = Rate::new(RateConvention::default(), 0.05);
        assert_relative_eq!(rate.shifted_bps(25.0).value, 0.0525, epsilon = 1e-15);
    }
}
