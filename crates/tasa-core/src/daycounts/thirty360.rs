//! 30/360 day count family.
//!
//! Every variant feeds the adjusted day numbers into the same formula:
//!
//! ```text
//! days = 360 × (Y2 − Y1) + 30 × (M2 − M1) + (D2 − D1)
//! ```
//!
//! and differs only in how `D1` and `D2` are adjusted at month ends.

use crate::types::Date;

fn thirty_360_days(start: Date, end: Date, d1: u32, d2: u32) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + (i64::from(d2) - i64::from(d1))
}

/// 30/360 "A": D1 is capped at 30, D2 is capped at 30 only when D1 ends up above 29.
pub(super) fn thirty_360_a(start: Date, end: Date) -> i64 {
    let d1 = start.day().min(30);
    let d2 = if d1 > 29 { end.day().min(30) } else { end.day() };
    thirty_360_days(start, end, d1, d2)
}

/// 30/360 US (NASD) with February end-of-month rules.
///
/// Rules, applied in order:
/// 1. End is a month end and both dates are the last day of February: D2 = 30
/// 2. End is a month end and start is the last day of February: D1 = 30
/// 3. D2 = 31 and D1 = 30: D2 = 30
/// 4. D1 = 31: D1 = 30
pub(super) fn thirty_360_us(start: Date, end: Date) -> i64 {
    let mut d1 = start.day();
    let mut d2 = end.day();
    let end_is_eom = end.is_end_of_month();

    if end_is_eom && start.is_last_day_of_february() && end.is_last_day_of_february() {
        d2 = 30;
    }
    if end_is_eom && start.is_last_day_of_february() {
        d1 = 30;
    }
    if d2 == 31 && d1 == 30 {
        d2 = 30;
    }
    if d1 == 31 {
        d1 = 30;
    }

    thirty_360_days(start, end, d1, d2)
}

/// 30E/360 (Eurobond basis): both days capped at 30 independently.
pub(super) fn thirty_360_e(start: Date, end: Date) -> i64 {
    thirty_360_days(start, end, start.day().min(30), end.day().min(30))
}

/// 30E/360 ISDA: month-end days become 30, except an end date at the end of February.
pub(super) fn thirty_360_e_isda(start: Date, end: Date) -> i64 {
    let d1 = if start.is_end_of_month() { 30 } else { start.day() };
    let d2 = if end.is_end_of_month() && end.month() != 2 {
        30
    } else {
        end.day()
    };
    thirty_360_days(start, end, d1, d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_thirty_360_a() {
        // D1 = 31 caps to 30, which pulls D2 = 31 down as well
        assert_eq!(thirty_360_a(d(2024, 1, 31), d(2024, 3, 31)), 60);
        // D1 = 29 leaves D2 = 31 untouched
        assert_eq!(thirty_360_a(d(2024, 1, 29), d(2024, 3, 31)), 62);
        assert_eq!(thirty_360_a(d(2024, 1, 15), d(2024, 7, 15)), 180);
        // February end is not treated specially
        assert_eq!(thirty_360_a(d(2023, 2, 28), d(2023, 3, 31)), 33);
    }

    #[test]
    fn test_thirty_360_us_february() {
        // Both last day of February
        assert_eq!(thirty_360_us(d(2023, 2, 28), d(2024, 2, 29)), 360);
        // Start last day of February, end month end
        assert_eq!(thirty_360_us(d(2024, 2, 29), d(2024, 3, 31)), 30);
        // Start last day of February, end not month end
        assert_eq!(thirty_360_us(d(2024, 2, 29), d(2024, 3, 30)), 31);
    }

    #[test]
    fn test_thirty_360_us_day_31() {
        assert_eq!(thirty_360_us(d(2024, 1, 30), d(2024, 3, 31)), 60);
        // D2 is only pulled down when D1 was already 30 before its own cap
        assert_eq!(thirty_360_us(d(2024, 1, 31), d(2024, 3, 31)), 61);
        assert_eq!(thirty_360_us(d(2024, 1, 29), d(2024, 3, 31)), 62);
        assert_eq!(thirty_360_us(d(2024, 3, 31), d(2024, 4, 30)), 30);
    }

    #[test]
    fn test_thirty_360_e() {
        assert_eq!(thirty_360_e(d(2024, 1, 29), d(2024, 3, 31)), 61);
        assert_eq!(thirty_360_e(d(2024, 1, 31), d(2024, 3, 31)), 60);
        assert_eq!(thirty_360_e(d(2024, 2, 29), d(2024, 3, 31)), 31);
    }

    #[test]
    fn test_thirty_360_e_isda() {
        // Start at end of February becomes 30
        assert_eq!(thirty_360_e_isda(d(2024, 2, 29), d(2024, 3, 31)), 30);
        // End at end of February stays as is
        assert_eq!(thirty_360_e_isda(d(2023, 8, 31), d(2024, 2, 29)), 179);
        // Non-leap February end
        assert_eq!(thirty_360_e_isda(d(2023, 2, 28), d(2023, 8, 31)), 180);
        // April 30 is a month end, stays 30
        assert_eq!(thirty_360_e_isda(d(2024, 4, 30), d(2024, 5, 31)), 30);
    }

    #[test]
    fn test_negative_counts() {
        assert_eq!(thirty_360_e(d(2024, 7, 15), d(2024, 1, 15)), -180);
        assert_eq!(thirty_360_a(d(2025, 1, 1), d(2024, 1, 1)), -360);
    }
}
