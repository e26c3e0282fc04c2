//! Day count conventions.
//!
//! A day count convention turns a date pair into a number of days and, with
//! a time-fraction base, into a year fraction. The set of conventions is
//! closed, so they are modelled as a single `Copy` enum dispatched with
//! `match`.
//!
//! # Supported Conventions
//!
//! - [`DayCountConvention::Actual`]: calendar days
//! - [`DayCountConvention::Thirty360A`]: 30/360 "A"
//! - [`DayCountConvention::Thirty360U`]: 30/360 US (NASD)
//! - [`DayCountConvention::Thirty360E`]: 30E/360
//! - [`DayCountConvention::Thirty360EIsda`]: 30E/360 ISDA
//! - [`DayCountConvention::BusinessDays`]: weekdays between the dates
//!
//! # Usage
//!
//! ```rust
//! use tasa_core::daycounts::DayCountConvention;
//! use tasa_core::types::Date;
//!
//! let start = Date::from_ymd(2024, 1, 31).unwrap();
//! let end = Date::from_ymd(2024, 3, 31).unwrap();
//!
//! assert_eq!(DayCountConvention::Thirty360E.day_count(start, end), 60);
//! assert_eq!(DayCountConvention::Actual.year_fraction(start, end, 360), 60.0 / 360.0);
//! ```

mod actual;
mod thirty360;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TasaError, TasaResult};
use crate::types::Date;

/// Enumeration of the supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountConvention {
    /// Actual calendar days.
    #[default]
    Actual,
    /// 30/360 "A".
    Thirty360A,
    /// 30/360 US (NASD), with February end-of-month rules.
    Thirty360U,
    /// 30E/360 (Eurobond basis).
    Thirty360E,
    /// 30E/360 ISDA.
    Thirty360EIsda,
    /// Weekdays in `(start, end]`.
    BusinessDays,
}

impl DayCountConvention {
    /// Returns the short code of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual => "act",
            DayCountConvention::Thirty360A => "30a",
            DayCountConvention::Thirty360U => "30u",
            DayCountConvention::Thirty360E => "30e",
            DayCountConvention::Thirty360EIsda => "30e-isda",
            DayCountConvention::BusinessDays => "bus",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Actual,
            DayCountConvention::Thirty360A,
            DayCountConvention::Thirty360U,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360EIsda,
            DayCountConvention::BusinessDays,
        ]
    }

    /// Number of days from `start` to `end` under this convention.
    ///
    /// Negative when `end` precedes `start`.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Actual => actual::actual(start, end),
            DayCountConvention::Thirty360A => thirty360::thirty_360_a(start, end),
            DayCountConvention::Thirty360U => thirty360::thirty_360_us(start, end),
            DayCountConvention::Thirty360E => thirty360::thirty_360_e(start, end),
            DayCountConvention::Thirty360EIsda => thirty360::thirty_360_e_isda(start, end),
            DayCountConvention::BusinessDays => actual::business_days(start, end),
        }
    }

    /// Year fraction `day_count(start, end) / base`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date, base: u32) -> f64 {
        self.day_count(start, end) as f64 / f64::from(base)
    }

    /// Element-wise day counts over two parallel date sequences.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::LengthMismatch` if the sequences differ in length.
    pub fn day_counts(&self, starts: &[Date], ends: &[Date]) -> TasaResult<Vec<i64>> {
        if starts.len() != ends.len() {
            return Err(TasaError::length_mismatch(starts.len(), ends.len()));
        }
        Ok(starts
            .iter()
            .zip(ends)
            .map(|(&s, &e)| self.day_count(s, e))
            .collect())
    }

    /// Day counts from a single start date to each end date.
    #[must_use]
    pub fn day_counts_from(&self, start: Date, ends: &[Date]) -> Vec<i64> {
        ends.iter().map(|&e| self.day_count(start, e)).collect()
    }

    /// Day counts from each start date to a single end date.
    #[must_use]
    pub fn day_counts_to(&self, starts: &[Date], end: Date) -> Vec<i64> {
        starts.iter().map(|&s| self.day_count(s, end)).collect()
    }

    /// Element-wise year fractions over two parallel date sequences.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::LengthMismatch` if the sequences differ in length.
    pub fn year_fractions(&self, starts: &[Date], ends: &[Date], base: u32) -> TasaResult<Vec<f64>> {
        let base = f64::from(base);
        Ok(self
            .day_counts(starts, ends)?
            .into_iter()
            .map(|days| days as f64 / base)
            .collect())
    }

    /// Year fractions from a single start date to each end date.
    #[must_use]
    pub fn year_fractions_from(&self, start: Date, ends: &[Date], base: u32) -> Vec<f64> {
        ends.iter()
            .map(|&e| self.year_fraction(start, e, base))
            .collect()
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = TasaError;

    /// Parses a convention from its short code or a common alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT" | "ACTUAL" => Ok(DayCountConvention::Actual),
            "30A" | "30/360 A" | "30A/360" => Ok(DayCountConvention::Thirty360A),
            "30U" | "30/360 US" | "30U/360" | "30/360" | "BOND" => {
                Ok(DayCountConvention::Thirty360U)
            }
            "30E" | "30E/360" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            "30E-ISDA" | "30EISDA" | "30E/360 ISDA" => Ok(DayCountConvention::Thirty360EIsda),
            "BUS" | "BUS_DAYS" | "BUSINESS DAYS" => Ok(DayCountConvention::BusinessDays),
            _ => Err(TasaError::parse(s, "day count convention")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_year_fraction_uses_base() {
        let start = d(2024, 1, 1);
        let end = d(2025, 1, 1);
        assert_eq!(DayCountConvention::Actual.year_fraction(start, end, 365), 366.0 / 365.0);
        assert_eq!(DayCountConvention::Thirty360E.year_fraction(start, end, 360), 1.0);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let starts = [d(2024, 1, 31), d(2024, 2, 29), d(2023, 8, 31)];
        let ends = [d(2024, 3, 31), d(2024, 3, 31), d(2024, 2, 29)];

        for conv in DayCountConvention::all() {
            let batch = conv.day_counts(&starts, &ends).unwrap();
            for (i, days) in batch.iter().enumerate() {
                assert_eq!(*days, conv.day_count(starts[i], ends[i]), "{conv}");
            }
            let yfs = conv.year_fractions(&starts, &ends, 360).unwrap();
            assert_eq!(yfs[2], conv.year_fraction(starts[2], ends[2], 360));
        }
    }

    #[test]
    fn test_batch_length_mismatch() {
        let starts = [d(2024, 1, 1), d(2024, 2, 1)];
        let ends = [d(2024, 6, 1)];
        let err = DayCountConvention::Actual.day_counts(&starts, &ends).unwrap_err();
        assert_eq!(err, TasaError::length_mismatch(2, 1));
        assert!(DayCountConvention::Thirty360A
            .year_fractions(&starts, &ends, 360)
            .is_err());
    }

    #[test]
    fn test_broadcast_forms() {
        let start = d(2024, 1, 1);
        let ends = [d(2024, 2, 1), d(2024, 3, 1)];
        assert_eq!(DayCountConvention::Actual.day_counts_from(start, &ends), vec![31, 60]);
        assert_eq!(
            DayCountConvention::Actual.day_counts_to(&ends, d(2024, 3, 1)),
            vec![29, 0]
        );
        assert_eq!(
            DayCountConvention::Actual.year_fractions_from(start, &ends, 365),
            vec![31.0 / 365.0, 60.0 / 365.0]
        );
    }

    #[test]
    fn test_parse_and_display() {
        for conv in DayCountConvention::all() {
            let parsed: DayCountConvention = conv.to_string().parse().unwrap();
            assert_eq!(parsed, *conv);
        }
        assert_eq!(
            "Actual".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual
        );
        assert!("ACT/ACT ICMA".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&DayCountConvention::Thirty360EIsda).unwrap();
        assert_eq!(json, "\"thirty360_e_isda\"");
        let parsed: DayCountConvention = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DayCountConvention::Thirty360EIsda);
    }
}
