//! Accrual schedule generation.

use serde::{Deserialize, Serialize};

use super::{BusinessDayConvention, Calendar, Tenor};
use crate::error::{TasaError, TasaResult};
use crate::types::Date;

/// Where an irregular period goes and whether it is merged into its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StubPolicy {
    /// Put the irregular period at the start (roll back from maturity).
    pub stub_first: bool,
    /// Merge the irregular period with the adjacent regular one.
    pub long_stub: bool,
}

impl Default for StubPolicy {
    fn default() -> Self {
        Self {
            stub_first: true,
            long_stub: true,
        }
    }
}

/// Inputs of [`generate_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    /// First accrual start date, kept unadjusted.
    pub start: Date,
    /// Distance from start to maturity.
    pub maturity: Tenor,
    /// Distance between regular accrual dates; zero gives a single period.
    pub frequency: Tenor,
    /// Adjustment applied to intermediate dates.
    pub convention: BusinessDayConvention,
    /// Adjustment applied to the maturity date; defaults to `convention`.
    pub maturity_convention: Option<BusinessDayConvention>,
    /// Stub placement.
    pub stub: StubPolicy,
}

/// Generates accrual dates from `spec.start` to the adjusted maturity.
///
/// Regular dates are rolled from maturity backwards when the stub goes
/// first, or from the start forwards otherwise. The first element is the
/// start date and the last the adjusted maturity.
///
/// # Errors
///
/// Returns `TasaError::CalendarError` when maturity is not after the start
/// or the roll does not reach the other end within its iteration cap.
///
/// # Example
///
/// ```rust
/// use tasa_core::calendars::*;
/// use tasa_core::types::Date;
///
/// let spec = ScheduleSpec {
///     start: Date::from_ymd(2024, 1, 15).unwrap(),
///     maturity: "1Y".parse().unwrap(),
///     frequency: "6M".parse().unwrap(),
///     convention: BusinessDayConvention::ModifiedFollowing,
///     maturity_convention: None,
///     stub: StubPolicy::default(),
/// };
/// let dates = generate_schedule(&spec, &WeekendCalendar).unwrap();
/// assert_eq!(dates.len(), 3);
/// ```
pub fn generate_schedule<C: Calendar + ?Sized>(spec: &ScheduleSpec, calendar: &C) -> TasaResult<Vec<Date>> {
    let start = spec.start;
    let maturity = spec.maturity.unadjusted_maturity(start, calendar)?;
    if maturity <= start {
        return Err(TasaError::calendar(format!(
            "maturity {maturity} is not after start {start}"
        )));
    }
    let maturity_convention = spec.maturity_convention.unwrap_or(spec.convention);
    let adjusted_maturity = calendar.adjust(maturity, maturity_convention);

    if spec.frequency.is_zero() {
        return Ok(vec![start, adjusted_maturity]);
    }

    let max_iterations = 10 + start.days_between(&maturity) / spec.frequency.approximate_days().max(1);
    let (anchor, direction) = if spec.stub.stub_first {
        (maturity, -1)
    } else {
        (start, 1)
    };

    // Regular dates strictly between start and maturity, in roll order
    let mut inner = Vec::new();
    let mut step = 1;
    let exact = loop {
        if i64::from(step) > max_iterations {
            return Err(TasaError::calendar(format!(
                "schedule from {start} to {maturity} every {} did not close after {max_iterations} steps",
                spec.frequency
            )));
        }
        let date = spec.frequency.advance(anchor, direction * step, calendar)?;
        if date <= start || date >= maturity {
            break date == start || date == maturity;
        }
        inner.push(date);
        step += 1;
    };

    if !exact && spec.stub.long_stub && !inner.is_empty() {
        // The last rolled date bounds the stub; dropping it merges the stub
        // into the neighbouring regular period
        inner.pop();
    }
    if spec.stub.stub_first {
        inner.reverse();
    }

    let mut schedule = Vec::with_capacity(inner.len() + 2);
    schedule.push(start);
    schedule.extend(inner.into_iter().map(|date| calendar.adjust(date, spec.convention)));
    schedule.push(adjusted_maturity);
    log::trace!("generated {} schedule dates from {start}", schedule.len());
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn spec(start: Date, maturity: &str, frequency: &str, stub: StubPolicy) -> ScheduleSpec {
        ScheduleSpec {
            start,
            maturity: maturity.parse().unwrap(),
            frequency: frequency.parse().unwrap(),
            convention: BusinessDayConvention::Unadjusted,
            maturity_convention: None,
            stub,
        }
    }

    #[test]
    fn test_regular_schedule() {
        let s = spec(d(2024, 1, 15), "2Y", "6M", StubPolicy::default());
        let dates = generate_schedule(&s, &WeekendCalendar).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 7, 15), d(2025, 1, 15), d(2025, 7, 15), d(2026, 1, 15)]
        );
    }

    #[test]
    fn test_short_first_stub() {
        // 14 months every 6 months from the back: stub Jan 15 -> Mar 15
        let policy = StubPolicy {
            stub_first: true,
            long_stub: false,
        };
        let s = spec(d(2024, 1, 15), "14M", "6M", policy);
        let dates = generate_schedule(&s, &WeekendCalendar).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 3, 15), d(2024, 9, 15), d(2025, 3, 15)]);
    }

    #[test]
    fn test_long_first_stub() {
        let s = spec(d(2024, 1, 15), "14M", "6M", StubPolicy::default());
        let dates = generate_schedule(&s, &WeekendCalendar).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 9, 15), d(2025, 3, 15)]);
    }

    #[test]
    fn test_last_stubs() {
        let short = StubPolicy {
            stub_first: false,
            long_stub: false,
        };
        let dates = generate_schedule(&spec(d(2024, 1, 15), "14M", "6M", short), &WeekendCalendar).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 7, 15), d(2025, 1, 15), d(2025, 3, 15)]);

        let long = StubPolicy {
            stub_first: false,
            long_stub: true,
        };
        let dates = generate_schedule(&spec(d(2024, 1, 15), "14M", "6M", long), &WeekendCalendar).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 7, 15), d(2025, 3, 15)]);
    }

    #[test]
    fn test_bullet_and_adjustment() {
        let mut s = spec(d(2024, 6, 15), "3M", "0", StubPolicy::default());
        s.convention = BusinessDayConvention::Following;
        // 2024-09-15 is a Sunday
        let dates = generate_schedule(&s, &WeekendCalendar).unwrap();
        assert_eq!(dates, vec![d(2024, 6, 15), d(2024, 9, 16)]);
    }

    #[test]
    fn test_intermediate_dates_adjusted() {
        let mut s = spec(d(2024, 3, 16), "1Y", "6M", StubPolicy::default());
        s.convention = BusinessDayConvention::ModifiedFollowing;
        let dates = generate_schedule(&s, &WeekendCalendar).unwrap();
        // 2024-09-16 is a Monday; 2025-03-16 is a Sunday
        assert_eq!(dates, vec![d(2024, 3, 16), d(2024, 9, 16), d(2025, 3, 17)]);
    }
}
