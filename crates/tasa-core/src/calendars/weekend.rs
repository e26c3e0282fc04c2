//! Weekend definitions.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{TasaError, TasaResult};

/// Bits of all seven weekdays.
const ALL_DAYS: u8 = 0x7f;

/// Named weekend patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekendType {
    /// Saturday and Sunday (most markets)
    #[default]
    SaturdaySunday,
    /// Friday and Saturday (Middle East markets)
    FridaySaturday,
    /// Sunday only
    SundayOnly,
    /// No weekends
    None,
}

impl WeekendType {
    /// Check if a weekday is a weekend day for this type.
    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        WeekendDays::from(*self).contains(weekday)
    }
}

/// Set of weekdays that are never business days.
///
/// Stored as a bitmask indexed by days from Monday, so two weekends can be
/// unioned when calendars are combined. A weekend never covers the whole
/// week, so every week has at least one potential business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekendDays(u8);

impl WeekendDays {
    /// An empty weekend.
    pub const NONE: WeekendDays = WeekendDays(0);

    /// Builds a weekend from a list of weekdays.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::CalendarError` if the list names all seven days.
    pub fn from_weekdays(weekdays: &[Weekday]) -> TasaResult<Self> {
        Self::try_from(weekdays.iter().fold(0, |acc, &w| acc | bit(w)))
    }

    /// Returns true if `weekday` is part of the weekend.
    #[inline]
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & bit(weekday) != 0
    }

    /// Weekdays in either weekend.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::CalendarError` if together they cover the week.
    pub fn union(self, other: WeekendDays) -> TasaResult<WeekendDays> {
        Self::try_from(self.0 | other.0)
    }
}

impl TryFrom<u8> for WeekendDays {
    type Error = TasaError;

    fn try_from(bits: u8) -> TasaResult<Self> {
        if bits & ALL_DAYS == ALL_DAYS || bits & !ALL_DAYS != 0 {
            return Err(TasaError::calendar(format!(
                "weekend mask {bits:#04x} leaves no business day in the week"
            )));
        }
        Ok(Self(bits))
    }
}

impl From<WeekendDays> for u8 {
    fn from(weekend: WeekendDays) -> Self {
        weekend.0
    }
}

impl Default for WeekendDays {
    fn default() -> Self {
        WeekendType::SaturdaySunday.into()
    }
}

impl From<WeekendType> for WeekendDays {
    fn from(weekend: WeekendType) -> Self {
        match weekend {
            WeekendType::SaturdaySunday => Self(bit(Weekday::Sat) | bit(Weekday::Sun)),
            WeekendType::FridaySaturday => Self(bit(Weekday::Fri) | bit(Weekday::Sat)),
            WeekendType::SundayOnly => Self(bit(Weekday::Sun)),
            WeekendType::None => Self::NONE,
        }
    }
}

fn bit(weekday: Weekday) -> u8 {
    1 << weekday.num_days_from_monday()
}
