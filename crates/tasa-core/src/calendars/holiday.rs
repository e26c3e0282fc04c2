//! Rule-based holiday calendar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::rules::HolidayRule;
use super::weekend::{WeekendDays, WeekendType};
use super::Calendar;
use crate::error::TasaResult;
use crate::types::Date;

/// A calendar whose holidays are generated from rules plus explicit dates.
///
/// Weekends are never business days regardless of the rules. Holidays are
/// evaluated lazily per year, so combining two calendars only merges their
/// rule lists.
///
/// # Example
///
/// ```rust
/// use tasa_core::calendars::{Calendar, HolidayCalendar};
/// use tasa_core::types::Date;
///
/// let chile = HolidayCalendar::chile();
/// let independence = Date::from_ymd(2024, 9, 18).unwrap();
/// assert!(chile.is_holiday(independence));
///
/// // Tuesday 17th precedes the holidays on Wednesday 18th and Thursday 19th
/// let next = chile.add_business_day(Date::from_ymd(2024, 9, 17).unwrap());
/// assert_eq!(next, Date::from_ymd(2024, 9, 23).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    rules: Vec<HolidayRule>,
    #[serde(default)]
    custom_holidays: BTreeSet<Date>,
    #[serde(default)]
    weekend: WeekendDays,
}

impl HolidayCalendar {
    /// Creates a calendar from a rule list with a Saturday/Sunday weekend.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<HolidayRule>) -> Self {
        Self {
            name: name.into(),
            rules,
            custom_holidays: BTreeSet::new(),
            weekend: WeekendDays::default(),
        }
    }

    /// Replaces the weekend definition.
    #[must_use]
    pub fn with_weekend(mut self, weekend: impl Into<WeekendDays>) -> Self {
        self.weekend = weekend.into();
        self
    }

    /// A calendar with only a Saturday/Sunday weekend.
    #[must_use]
    pub fn weekends_only() -> Self {
        Self::new("Weekend Only", Vec::new()).with_weekend(WeekendType::SaturdaySunday)
    }

    /// The holiday rules of this calendar.
    #[must_use]
    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    /// Explicit holidays added on top of the rules.
    #[must_use]
    pub fn custom_holidays(&self) -> &BTreeSet<Date> {
        &self.custom_holidays
    }

    /// Weekdays treated as weekend.
    #[must_use]
    pub fn weekend(&self) -> WeekendDays {
        self.weekend
    }

    /// Appends a rule.
    pub fn add_rule(&mut self, rule: HolidayRule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Removes a rule, returning whether it was present.
    pub fn remove_rule(&mut self, rule: &HolidayRule) -> bool {
        match self.rules.iter().position(|r| r == rule) {
            Some(index) => {
                self.rules.remove(index);
                true
            }
            None => false,
        }
    }

    /// Adds an explicit holiday.
    pub fn add_custom_holiday(&mut self, date: Date) {
        self.custom_holidays.insert(date);
    }

    /// Adds several explicit holidays.
    pub fn add_custom_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        self.custom_holidays.extend(dates);
    }

    /// Removes an explicit holiday, returning whether it was present.
    pub fn remove_custom_holiday(&mut self, date: Date) -> bool {
        self.custom_holidays.remove(&date)
    }

    /// True if `date` is a weekend day.
    pub fn is_weekend(&self, date: Date) -> bool {
        self.weekend.contains(date.weekday())
    }

    /// All rule-generated and custom holidays in `year`, weekends excluded.
    pub fn get_holidays(&self, year: i32) -> BTreeSet<Date> {
        let mut holidays: BTreeSet<Date> = self
            .rules
            .iter()
            .flat_map(|rule| (year - 1..=year + 1).filter_map(move |y| rule.holiday(y)))
            .filter(|date| date.year() == year)
            .collect();
        holidays.extend(
            self.custom_holidays
                .iter()
                .filter(|date| date.year() == year)
                .copied(),
        );
        holidays
    }

    /// Union of both calendars' rules and weekends.
    ///
    /// Custom holidays are not carried over; neither operand is modified.
    ///
    /// # Errors
    ///
    /// Fails when the two weekends together cover the whole week.
    pub fn combine(&self, other: &HolidayCalendar) -> TasaResult<HolidayCalendar> {
        let mut rules = self.rules.clone();
        for rule in &other.rules {
            if !rules.contains(rule) {
                rules.push(rule.clone());
            }
        }
        Ok(HolidayCalendar {
            name: format!("{} + {}", self.name, other.name),
            rules,
            custom_holidays: BTreeSet::new(),
            weekend: self.weekend.union(other.weekend)?,
        })
    }

    /// Like [`combine`](Self::combine), also merging custom holidays.
    pub fn combine_with_custom_holidays(&self, other: &HolidayCalendar) -> TasaResult<HolidayCalendar> {
        let mut combined = self.combine(other)?;
        combined.custom_holidays = self
            .custom_holidays
            .union(&other.custom_holidays)
            .copied()
            .collect();
        Ok(combined)
    }

    fn is_rule_holiday(&self, date: Date) -> bool {
        // Rules may shift a holiday across a year boundary, so neighbouring
        // years are consulted as well.
        let year = date.year();
        self.rules.iter().any(|rule| {
            (year - 1..=year + 1).any(|y| rule.holiday(y) == Some(date))
        })
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !(self.is_weekend(date)
            || self.custom_holidays.contains(&date)
            || self.is_rule_holiday(date))
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::weekends_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::MonthDay;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn simple() -> HolidayCalendar {
        HolidayCalendar::new("Simple", vec![HolidayRule::fixed(1, 1), HolidayRule::fixed(12, 25)])
    }

    #[test]
    fn test_is_holiday() {
        let cal = simple();
        assert!(cal.is_holiday(d(2024, 12, 25)));
        assert!(cal.is_holiday(d(2024, 1, 6)));
        assert!(!cal.is_holiday(d(2024, 12, 24)));
    }

    #[test]
    fn test_custom_holidays() {
        let mut cal = simple();
        let election = d(2024, 11, 5);
        assert!(!cal.is_holiday(election));
        cal.add_custom_holiday(election);
        assert!(cal.is_holiday(election));
        assert!(cal.get_holidays(2024).contains(&election));
        assert!(cal.remove_custom_holiday(election));
        assert!(!cal.is_holiday(election));
        assert!(!cal.remove_custom_holiday(election));
    }

    #[test]
    fn test_get_holidays_excludes_absent_rules() {
        let cal = HolidayCalendar::new(
            "Bridge",
            vec![
                HolidayRule::fixed(9, 18),
                HolidayRule::Sandwich {
                    first: MonthDay::fixed(9, 18),
                    second: MonthDay::fixed(9, 19),
                },
            ],
        );
        assert_eq!(cal.get_holidays(2025), [d(2025, 9, 18)].into_iter().collect());
        assert_eq!(
            cal.get_holidays(2024),
            [d(2024, 9, 18), d(2024, 9, 20)].into_iter().collect()
        );
    }

    #[test]
    fn test_business_day_steps_skip_holidays() {
        let cal = simple();
        // Tuesday 2024-12-24 -> Thursday 26th
        assert_eq!(cal.add_business_day(d(2024, 12, 24)), d(2024, 12, 26));
        assert_eq!(cal.subtract_business_day(d(2024, 12, 26)), d(2024, 12, 24));
        // Friday 2024-12-27 + 3 -> Thursday 2025-01-02 (weekend and New Year)
        assert_eq!(cal.add_business_days(d(2024, 12, 27), 3), d(2025, 1, 2));
        assert_eq!(cal.subtract_business_days(d(2025, 1, 2), 3), d(2024, 12, 27));
    }

    #[test]
    fn test_combine_unions_rules_without_mutating() {
        let mut a = simple();
        a.add_custom_holiday(d(2024, 3, 4));
        let b = HolidayCalendar::new("Other", vec![HolidayRule::fixed(7, 4), HolidayRule::fixed(1, 1)])
            .with_weekend(WeekendType::FridaySaturday);

        let combined = a.combine(&b).unwrap();
        assert_eq!(combined.rules().len(), 3);
        assert!(combined.is_holiday(d(2024, 7, 4)));
        assert!(combined.is_holiday(d(2024, 12, 25)));
        // Friday from the other weekend, Sunday from ours
        assert!(combined.is_holiday(d(2024, 3, 8)));
        assert!(combined.is_holiday(d(2024, 3, 10)));
        // Custom holidays are not merged by default
        assert!(!combined.is_holiday(d(2024, 3, 4)));
        assert!(a.combine_with_custom_holidays(&b).unwrap().is_holiday(d(2024, 3, 4)));

        assert_eq!(a.rules().len(), 2);
        assert_eq!(b.rules().len(), 2);
        assert!(!a.is_holiday(d(2024, 7, 4)));
    }

    #[test]
    fn test_combine_rejects_weekend_covering_the_week() {
        use chrono::Weekday::{Fri, Mon, Thu, Tue, Wed};
        let working_days = WeekendDays::from_weekdays(&[Mon, Tue, Wed, Thu, Fri]).unwrap();
        let odd = HolidayCalendar::new("Odd", Vec::new()).with_weekend(working_days);
        assert!(matches!(
            simple().combine(&odd),
            Err(crate::error::TasaError::CalendarError { .. })
        ));
        assert!(simple().combine_with_custom_holidays(&odd).is_err());

        // A six-day weekend still terminates business day stepping
        let six_days = working_days.union(WeekendType::FridaySaturday.into()).unwrap();
        let sunday_only = HolidayCalendar::new("Sundays", Vec::new()).with_weekend(six_days);
        assert_eq!(sunday_only.add_business_day(d(2024, 3, 4)), d(2024, 3, 10));
        assert_eq!(sunday_only.subtract_business_day(d(2024, 3, 10)), d(2024, 3, 3));
    }

    #[test]
    fn test_remove_rule() {
        let mut cal = simple();
        let christmas = HolidayRule::fixed(12, 25);
        assert!(cal.remove_rule(&christmas));
        assert_eq!(cal.rules().len(), 1);
        assert!(!cal.is_holiday(d(2024, 12, 25)));
        assert!(!cal.remove_rule(&christmas));

        cal.add_rule(christmas.clone());
        assert!(cal.is_holiday(d(2024, 12, 25)));
    }

    #[test]
    fn test_rule_shifted_into_next_year() {
        // Dec 31 moved to a Monday when it falls on a Friday
        let cal = HolidayCalendar::new("Shifted", vec![HolidayRule::MonthDay(MonthDay::monday_adjustable(12, 31))]);
        // 2027-12-31 is a Friday -> 2028-01-03
        assert!(cal.is_holiday(d(2028, 1, 3)));
        assert!(!cal.is_holiday(d(2027, 12, 30)));
        assert_eq!(d(2027, 12, 31).weekday(), Weekday::Fri);
        assert!(cal.get_holidays(2028).contains(&d(2028, 1, 3)));
        assert!(!cal.get_holidays(2027).contains(&d(2027, 12, 31)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cal = simple();
        cal.add_custom_holiday(d(2024, 5, 2));
        let json = serde_json::to_string(&cal).unwrap();
        let parsed: HolidayCalendar = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cal);
    }
}
