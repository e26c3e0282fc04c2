//! Preset market calendars.
//!
//! Every preset includes New Year's Day, Christmas, New Year's Eve and Good
//! Friday. Easter Monday is added for the European calendars.

use chrono::Weekday;

use super::holiday::HolidayCalendar;
use super::rules::{HolidayRule, MonthDay};

fn universal_rules(easter_monday: bool) -> Vec<HolidayRule> {
    let mut rules = vec![
        HolidayRule::fixed(1, 1),
        HolidayRule::fixed(12, 25),
        HolidayRule::fixed(12, 31),
        HolidayRule::good_friday(),
    ];
    if easter_monday {
        rules.push(HolidayRule::easter_monday());
    }
    rules
}

fn with_universal(name: &str, local: Vec<HolidayRule>, easter_monday: bool) -> HolidayCalendar {
    let mut rules = universal_rules(easter_monday);
    rules.extend(local);
    HolidayCalendar::new(name, rules)
}

impl HolidayCalendar {
    /// Chilean banking calendar.
    #[must_use]
    pub fn chile() -> Self {
        with_universal(
            "Chile",
            vec![
                HolidayRule::fixed(5, 1),
                HolidayRule::fixed(6, 20),
                HolidayRule::fixed(7, 16),
                HolidayRule::fixed(8, 15),
                HolidayRule::fixed(9, 18),
                HolidayRule::fixed(9, 19),
                HolidayRule::Sandwich {
                    first: MonthDay::fixed(9, 18),
                    second: MonthDay::fixed(9, 19),
                },
                HolidayRule::fixed(10, 12),
                HolidayRule::fixed(10, 31),
                HolidayRule::fixed(11, 1),
                HolidayRule::fixed(12, 8),
                HolidayRule::fixed(12, 24),
            ],
            false,
        )
    }

    /// United States federal calendar.
    #[must_use]
    pub fn united_states() -> Self {
        with_universal(
            "United States",
            vec![
                HolidayRule::OrdinalWeekday {
                    month: 1,
                    ordinal: 3,
                    weekday: Weekday::Mon,
                },
                HolidayRule::OrdinalWeekday {
                    month: 2,
                    ordinal: 3,
                    weekday: Weekday::Mon,
                },
                HolidayRule::LastWeekday {
                    month: 5,
                    weekday: Weekday::Mon,
                },
                HolidayRule::fixed(6, 19),
                HolidayRule::fixed(7, 4),
                HolidayRule::OrdinalWeekday {
                    month: 9,
                    ordinal: 1,
                    weekday: Weekday::Mon,
                },
                HolidayRule::OrdinalWeekday {
                    month: 10,
                    ordinal: 2,
                    weekday: Weekday::Mon,
                },
                HolidayRule::fixed(11, 11),
                HolidayRule::OrdinalWeekday {
                    month: 11,
                    ordinal: 4,
                    weekday: Weekday::Thu,
                },
            ],
            false,
        )
    }

    /// Eurozone settlement calendar.
    #[must_use]
    pub fn eurozone() -> Self {
        with_universal(
            "Eurozone",
            vec![HolidayRule::fixed(5, 1), HolidayRule::fixed(12, 26)],
            true,
        )
    }

    /// England bank holiday calendar.
    #[must_use]
    pub fn england() -> Self {
        with_universal(
            "England",
            vec![
                HolidayRule::fixed(5, 8),
                HolidayRule::LastWeekday {
                    month: 5,
                    weekday: Weekday::Mon,
                },
                HolidayRule::fixed(8, 31),
                HolidayRule::fixed(12, 28),
            ],
            true,
        )
    }
}
