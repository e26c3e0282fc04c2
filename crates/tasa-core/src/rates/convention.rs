//! Rate conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::InterestConvention;
use crate::daycounts::DayCountConvention;
use crate::types::Date;

/// How a rate value turns into a wealth factor between two dates.
///
/// Two conventions are equal iff the interest convention, the day count
/// and the time-fraction base all match. The default is
/// Compounded / Actual / 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateConvention {
    /// Compounding rule.
    #[serde(default)]
    pub interest: InterestConvention,
    /// Day count used for the year fraction.
    #[serde(default)]
    pub day_count: DayCountConvention,
    /// Days per year in the year fraction.
    #[serde(default = "default_base")]
    pub base: u32,
}

fn default_base() -> u32 {
    365
}

impl RateConvention {
    /// Creates a new rate convention.
    #[must_use]
    pub const fn new(interest: InterestConvention, day_count: DayCountConvention, base: u32) -> Self {
        Self {
            interest,
            day_count,
            base,
        }
    }

    /// Linear / Actual / 360, the money-market convention.
    #[must_use]
    pub const fn linear_act_360() -> Self {
        Self::new(InterestConvention::Linear, DayCountConvention::Actual, 360)
    }

    /// Compounded / Actual / 365.
    #[must_use]
    pub const fn compounded_act_365() -> Self {
        Self::new(InterestConvention::Compounded, DayCountConvention::Actual, 365)
    }

    /// Year fraction between two dates under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count.year_fraction(start, end, self.base)
    }
}

impl Default for RateConvention {
    fn default() -> Self {
        Self::compounded_act_365()
    }
}

impl fmt::Display for RateConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.interest.code(), self.day_count, self.base)
    }
}
