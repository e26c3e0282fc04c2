//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with business-day arithmetic
//! - Rule-based holiday calendars ([`HolidayCalendar`]) and market presets
//! - Business day adjustment conventions
//! - Tenors and accrual schedule generation

mod conventions;
mod holiday;
mod presets;
mod rules;
mod schedule;
mod tenor;
mod weekend;

pub use conventions::{adjust, BusinessDayConvention};
pub use holiday::HolidayCalendar;
pub use rules::{easter_sunday, HolidayRule, MonthDay};
pub use schedule::{generate_schedule, ScheduleSpec, StubPolicy};
pub use tenor::{Tenor, TenorUnit};
pub use weekend::{WeekendDays, WeekendType};

use crate::types::Date;

/// Trait for business day calendars.
///
/// Implementors only decide which days are business days; stepping,
/// adjustment and counting are provided on top of that.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend day or a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// First business day strictly after `date`.
    fn add_business_day(&self, date: Date) -> Date {
        let mut result = date.add_days(1);
        while self.is_holiday(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Last business day strictly before `date`.
    fn subtract_business_day(&self, date: Date) -> Date {
        let mut result = date.add_days(-1);
        while self.is_holiday(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Advances a date by a number of business days; negative moves backward.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        for _ in 0..days.unsigned_abs() {
            result = if days >= 0 {
                self.add_business_day(result)
            } else {
                self.subtract_business_day(result)
            };
        }
        result
    }

    /// Moves a date back by a number of business days.
    fn subtract_business_days(&self, date: Date, days: i32) -> Date {
        self.add_business_days(date, -days)
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        if self.is_business_day(date) {
            date
        } else {
            self.add_business_day(date)
        }
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        if self.is_business_day(date) {
            date
        } else {
            self.subtract_business_day(date)
        }
    }

    /// Counts business days in `(start, end]`.
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}
