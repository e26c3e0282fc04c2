//! # Tasa Core
//!
//! Foundational building blocks for the Tasa fixed income valuation core.
//!
//! - **Types**: `Date`, `Currency` and contractual decimal rounding
//! - **Calendars**: rule-based holiday calendars, business-day arithmetic,
//!   adjustment conventions, tenors and schedule generation
//! - **Day Counts**: the Actual, 30/360 family and business-day conventions
//! - **Rates**: interest (compounding) conventions, `RateConvention` and `Rate`
//!
//! ## Example
//!
//! ```rust
//! use tasa_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 1, 26).unwrap();
//!
//! let linear = RateConvention::new(InterestConvention::Linear, DayCountConvention::Actual, 360);
//! let rate = Rate::new(linear, 0.03);
//! let annual = rate.convert(RateConvention::default(), start, end).unwrap();
//!
//! assert!((annual.wealth_factor(start, end) - rate.wealth_factor(start, end)).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, HolidayRule, StubPolicy, Tenor,
        TenorUnit, WeekendCalendar, WeekendType,
    };
    pub use crate::daycounts::DayCountConvention;
    pub use crate::error::{TasaError, TasaResult};
    pub use crate::rates::{InterestConvention, Rate, RateConvention};
    pub use crate::types::{round_to, Currency, Date};
}

// Re-export commonly used types at crate root
pub use error::{TasaError, TasaResult};
pub use types::{Currency, Date};
