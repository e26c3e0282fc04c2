//! Domain types shared by every Tasa crate.
//!
//! - [`Date`]: calendar date with month-end helpers
//! - [`Currency`]: ISO currency codes
//! - [`round_to`]: contractual decimal rounding

mod currency;
mod date;
mod rounding;

pub use currency::Currency;
pub use date::Date;
pub use rounding::round_to;
