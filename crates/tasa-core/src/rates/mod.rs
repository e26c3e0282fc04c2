//! Interest conventions, rate conventions and rates.
//!
//! A [`RateConvention`] composes an [`InterestConvention`], a
//! [`DayCountConvention`](crate::daycounts::DayCountConvention) and a
//! time-fraction base. A [`Rate`] pairs a convention with a value and turns
//! date pairs into wealth factors, discount factors and accrued interest.

mod convention;
mod interest;
mod rate;

pub use convention::RateConvention;
pub use interest::InterestConvention;
pub use rate::Rate;
