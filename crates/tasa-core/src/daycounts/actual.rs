//! Actual and business-day counts.

use crate::types::Date;

/// Raw calendar-day difference.
pub(super) fn actual(start: Date, end: Date) -> i64 {
    start.days_between(&end)
}

/// Weekdays in `(start, end]`, negated when `end < start`.
pub(super) fn business_days(start: Date, end: Date) -> i64 {
    if start == end {
        return 0;
    }
    let (from, to, sign) = if start < end {
        (start, end, 1)
    } else {
        (end, start, -1)
    };

    let total = from.days_between(&to);
    let full_weeks = total / 7;
    let mut count = full_weeks * 5;
    let mut current = from.add_days(full_weeks * 7);
    while current < to {
        current = current.add_days(1);
        if !current.is_weekend() {
            count += 1;
        }
    }
    count * sign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_actual_leap_year() {
        assert_eq!(actual(d(2024, 1, 1), d(2025, 1, 1)), 366);
        assert_eq!(actual(d(2023, 1, 1), d(2024, 1, 1)), 365);
        assert_eq!(actual(d(2024, 3, 1), d(2024, 2, 1)), -29);
    }

    #[test]
    fn test_business_days() {
        // Monday to Friday
        assert_eq!(business_days(d(2024, 1, 8), d(2024, 1, 12)), 4);
        // Friday to Monday skips the weekend
        assert_eq!(business_days(d(2024, 1, 12), d(2024, 1, 15)), 1);
        // Saturday to Sunday
        assert_eq!(business_days(d(2024, 1, 13), d(2024, 1, 14)), 0);
        assert_eq!(business_days(d(2024, 1, 15), d(2024, 1, 8)), -5);
        assert_eq!(business_days(d(2024, 1, 1), d(2024, 12, 31)), 261);
    }
}
