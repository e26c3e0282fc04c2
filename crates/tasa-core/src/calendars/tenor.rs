//! Tenors such as `3M` or `1Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BusinessDayConvention, Calendar};
use crate::error::{TasaError, TasaResult};
use crate::types::Date;

/// Unit of a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Business days on a calendar.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months, clamped to month end.
    Months,
    /// Calendar years.
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A length of time expressed as a count of units.
///
/// # Example
///
/// ```rust
/// use tasa_core::calendars::{Tenor, WeekendCalendar};
/// use tasa_core::types::Date;
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let start = Date::from_ymd(2024, 8, 31).unwrap();
/// let maturity = tenor.unadjusted_maturity(start, &WeekendCalendar).unwrap();
/// assert_eq!(maturity, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    /// Number of units.
    pub value: u32,
    /// Unit.
    pub unit: TenorUnit,
}

impl Tenor {
    /// Creates a new tenor.
    #[must_use]
    pub const fn new(value: u32, unit: TenorUnit) -> Self {
        Self { value, unit }
    }

    /// Returns true for a zero-length tenor.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Approximate length in calendar days, used to bound schedule loops.
    #[must_use]
    pub fn approximate_days(&self) -> i64 {
        let per_unit = match self.unit {
            TenorUnit::Days => 1,
            TenorUnit::Weeks => 7,
            TenorUnit::Months => 30,
            TenorUnit::Years => 365,
        };
        i64::from(self.value) * per_unit
    }

    /// Moves `date` by `multiple` times this tenor; negative multiples move back.
    ///
    /// Month and year tenors are applied as a single month offset from
    /// `date`, so repeated calls from a fixed anchor do not drift at
    /// month ends.
    pub fn advance<C: Calendar + ?Sized>(&self, date: Date, multiple: i32, calendar: &C) -> TasaResult<Date> {
        let steps = i64::from(self.value) * i64::from(multiple);
        let steps_i32 = i32::try_from(steps)
            .map_err(|_| TasaError::calendar(format!("tenor {self} x {multiple} overflows")))?;
        match self.unit {
            TenorUnit::Days => Ok(calendar.add_business_days(date, steps_i32)),
            TenorUnit::Weeks => Ok(date.add_days(7 * steps)),
            TenorUnit::Months => date.add_months(steps_i32),
            TenorUnit::Years => date.add_months(steps_i32.saturating_mul(12)),
        }
    }

    /// Date one tenor after `date`, before business-day adjustment.
    pub fn unadjusted_maturity<C: Calendar + ?Sized>(&self, date: Date, calendar: &C) -> TasaResult<Date> {
        self.advance(date, 1, calendar)
    }

    /// Date one tenor after `date`, adjusted with `convention`.
    pub fn adjusted_maturity<C: Calendar + ?Sized>(
        &self,
        date: Date,
        calendar: &C,
        convention: BusinessDayConvention,
    ) -> TasaResult<Date> {
        let unadjusted = self.unadjusted_maturity(date, calendar)?;
        Ok(calendar.adjust(unadjusted, convention))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = TasaError;

    /// Parses `<n><unit>` with unit one of `D`, `W`, `M`, `Y` (case-insensitive),
    /// plus `ON` (1D) and `TN` (2D).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('/', "").to_uppercase();
        match normalized.as_str() {
            "ON" => return Ok(Tenor::new(1, TenorUnit::Days)),
            "TN" => return Ok(Tenor::new(2, TenorUnit::Days)),
            "0" => return Ok(Tenor::new(0, TenorUnit::Months)),
            _ => {}
        }

        let mut chars = normalized.chars();
        let unit = match chars.next_back() {
            Some('D') => TenorUnit::Days,
            Some('W') => TenorUnit::Weeks,
            Some('M') => TenorUnit::Months,
            Some('Y') => TenorUnit::Years,
            _ => return Err(TasaError::parse(s, "tenor")),
        };
        let value = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| TasaError::parse(s, "tenor"))?;
        Ok(Tenor::new(value, unit))
    }
}
