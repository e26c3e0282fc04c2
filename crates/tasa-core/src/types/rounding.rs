//! Contractual decimal rounding.
//!
//! Prices, par values and settlement amounts are rounded on their decimal
//! representation, not on the binary float, so that `100.00005` rounds the
//! way a counterparty reading the printed figure expects.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{TasaError, TasaResult};

/// Rounds `value` to `decimals` places, half-to-even on its decimal form.
///
/// # Errors
///
/// Returns `TasaError::RoundingError` for non-finite values or values
/// outside the range a `Decimal` can hold.
///
/// # Example
///
/// ```rust
/// use tasa_core::types::round_to;
///
/// assert_eq!(round_to(101.23456, 4).unwrap(), 101.2346);
/// assert_eq!(round_to(2.5, 0).unwrap(), 2.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> TasaResult<f64> {
    let decimal = Decimal::from_f64(value).ok_or_else(|| TasaError::RoundingError {
        reason: format!("{value} is not representable as a decimal"),
    })?;
    decimal
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .ok_or_else(|| TasaError::RoundingError {
            reason: format!("{value} rounded to {decimals} places overflowed"),
        })
}
