//! Holiday-generation rules.
//!
//! A rule produces at most one holiday per year. Rules that do not apply in
//! a given year (a sandwich bridge day when neither neighbour falls on a
//! Tuesday or Thursday, a fifth weekday that spills into the next month,
//! Feb 29 outside leap years) yield `None`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::types::Date;

/// A fixed month/day holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Move mid-week occurrences to a Monday or Friday.
    #[serde(default)]
    pub monday_adjustable: bool,
}

impl MonthDay {
    /// A fixed holiday that never moves.
    #[must_use]
    pub const fn fixed(month: u32, day: u32) -> Self {
        Self {
            month,
            day,
            monday_adjustable: false,
        }
    }

    /// A holiday moved to make a long weekend.
    ///
    /// Tuesday through Thursday move forward to the Friday; a Friday moves
    /// forward to the following Monday.
    #[must_use]
    pub const fn monday_adjustable(month: u32, day: u32) -> Self {
        Self {
            month,
            day,
            monday_adjustable: true,
        }
    }

    /// The holiday in `year`.
    pub fn holiday(&self, year: i32) -> Option<Date> {
        let date = Date::from_ymd(year, self.month, self.day).ok()?;
        if !self.monday_adjustable {
            return Some(date);
        }
        let shift = match date.weekday() {
            Weekday::Tue => 3,
            Weekday::Wed => 2,
            Weekday::Thu => 1,
            Weekday::Fri => 3,
            _ => 0,
        };
        Some(date.add_days(shift))
    }
}

/// A rule generating one holiday per year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayRule {
    /// Fixed month/day, optionally moved to a long weekend.
    MonthDay(MonthDay),
    /// The nth occurrence of a weekday in a month (e.g. 3rd Monday of January).
    OrdinalWeekday {
        /// Month (1-12).
        month: u32,
        /// 1-based occurrence.
        ordinal: u32,
        /// Weekday.
        weekday: Weekday,
    },
    /// The last occurrence of a weekday in a month.
    LastWeekday {
        /// Month (1-12).
        month: u32,
        /// Weekday.
        weekday: Weekday,
    },
    /// Bridge day between a weekend and a pair of consecutive holidays.
    ///
    /// If `first` falls on a Tuesday the Monday before is a holiday;
    /// otherwise if `second` falls on a Thursday the Friday after is.
    Sandwich {
        /// Earlier of the two consecutive holidays.
        first: MonthDay,
        /// Later of the two consecutive holidays.
        second: MonthDay,
    },
    /// A day offset from Easter Sunday (Good Friday is -2).
    EasterOffset {
        /// Days relative to Easter Sunday.
        days: i64,
    },
}

impl HolidayRule {
    /// Fixed month/day holiday.
    #[must_use]
    pub const fn fixed(month: u32, day: u32) -> Self {
        HolidayRule::MonthDay(MonthDay::fixed(month, day))
    }

    /// Good Friday.
    #[must_use]
    pub const fn good_friday() -> Self {
        HolidayRule::EasterOffset { days: -2 }
    }

    /// Easter Monday.
    #[must_use]
    pub const fn easter_monday() -> Self {
        HolidayRule::EasterOffset { days: 1 }
    }

    /// The holiday this rule generates in `year`, if any.
    pub fn holiday(&self, year: i32) -> Option<Date> {
        match self {
            HolidayRule::MonthDay(rule) => rule.holiday(year),
            HolidayRule::OrdinalWeekday {
                month,
                ordinal,
                weekday,
            } => nth_weekday(year, *month, *ordinal, *weekday),
            HolidayRule::LastWeekday { month, weekday } => last_weekday(year, *month, *weekday),
            HolidayRule::Sandwich { first, second } => {
                let first = first.holiday(year)?;
                if first.weekday() == Weekday::Tue {
                    return Some(first.add_days(-1));
                }
                let second = second.holiday(year)?;
                if second.weekday() == Weekday::Thu {
                    return Some(second.add_days(1));
                }
                None
            }
            HolidayRule::EasterOffset { days } => {
                easter_sunday(year).map(|easter| easter.add_days(*days))
            }
        }
    }
}

/// Easter Sunday of `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<Date> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32).ok()
}

fn nth_weekday(year: i32, month: u32, ordinal: u32, weekday: Weekday) -> Option<Date> {
    if ordinal == 0 {
        return None;
    }
    let first = Date::from_ymd(year, month, 1).ok()?;
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    let date = first.add_days(i64::from(offset) + 7 * i64::from(ordinal - 1));
    (date.month() == month).then_some(date)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<Date> {
    let last = Date::from_ymd(year, month, 1).ok()?.end_of_month();
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    Some(last.add_days(-i64::from(offset)))
}
