//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::TasaError;
use crate::types::Date;

/// How a date that falls on a holiday is moved to a business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,

    /// Move to the following business day.
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[default]
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = TasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "unadjusted" | "none" => Ok(BusinessDayConvention::Unadjusted),
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modified following" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modified preceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            _ => Err(TasaError::parse(s, "business day convention")),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(date: Date, convention: BusinessDayConvention, calendar: &C) -> Date {
    if !calendar.is_holiday(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => calendar.add_business_day(date),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = calendar.add_business_day(date);
            if adjusted.month() != date.month() {
                calendar.subtract_business_day(date)
            } else {
                adjusted
            }
        }
        BusinessDayConvention::Preceding => calendar.subtract_business_day(date),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = calendar.subtract_business_day(date);
            if adjusted.month() != date.month() {
                calendar.add_business_day(date)
            } else {
                adjusted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        let saturday = d(2025, 1, 4);
        assert_eq!(adjust(saturday, BusinessDayConvention::Following, &cal), d(2025, 1, 6));
        assert_eq!(adjust(saturday, BusinessDayConvention::Preceding, &cal), d(2025, 1, 3));
        assert_eq!(adjust(saturday, BusinessDayConvention::Unadjusted, &cal), saturday);
    }

    #[test]
    fn test_modified_following_month_end() {
        let cal = WeekendCalendar;
        // Saturday 2024-08-31 would roll into September
        assert_eq!(
            adjust(d(2024, 8, 31), BusinessDayConvention::ModifiedFollowing, &cal),
            d(2024, 8, 30)
        );
        assert_eq!(
            adjust(d(2025, 1, 5), BusinessDayConvention::ModifiedFollowing, &cal),
            d(2025, 1, 6)
        );
    }

    #[test]
    fn test_modified_preceding_month_start() {
        let cal = WeekendCalendar;
        // Sunday 2024-09-01 would roll back into August
        assert_eq!(
            adjust(d(2024, 9, 1), BusinessDayConvention::ModifiedPreceding, &cal),
            d(2024, 9, 2)
        );
    }

    #[test]
    fn test_business_day_unchanged() {
        let cal = WeekendCalendar;
        let monday = d(2025, 1, 6);
        for conv in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            assert_eq!(adjust(monday, conv, &cal), monday);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "modified_following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "MP".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedPreceding
        );
        assert!("nearest".parse::<BusinessDayConvention>().is_err());
    }
}
