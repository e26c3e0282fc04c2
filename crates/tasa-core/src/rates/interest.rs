//! Interest (compounding) conventions.
//!
//! An interest convention maps a rate and a year fraction `t` to a wealth
//! factor, and back:
//!
//! | Convention  | Wealth factor | Inverse         |
//! |-------------|---------------|-----------------|
//! | Linear      | `1 + r·t`     | `(wf − 1) / t`  |
//! | Compounded  | `(1 + r)^t`   | `wf^(1/t) − 1`  |
//! | Exponential | `exp(r·t)`    | `ln(wf) / t`    |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TasaError, TasaResult};

/// How interest accrues over a year fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestConvention {
    /// Simple interest.
    Linear,
    /// Annually compounded interest.
    #[default]
    Compounded,
    /// Continuously compounded interest.
    Exponential,
}

impl InterestConvention {
    /// Returns the single-letter code of the convention.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            InterestConvention::Linear => "l",
            InterestConvention::Compounded => "c",
            InterestConvention::Exponential => "e",
        }
    }

    /// Wealth factor of `rate` accrued over `year_fraction`.
    #[must_use]
    pub fn wealth_factor(&self, rate: f64, year_fraction: f64) -> f64 {
        match self {
            InterestConvention::Linear => 1.0 + rate * year_fraction,
            InterestConvention::Compounded => (1.0 + rate).powf(year_fraction),
            InterestConvention::Exponential => (rate * year_fraction).exp(),
        }
    }

    /// Derivative of the wealth factor with respect to the rate.
    #[must_use]
    pub fn wealth_factor_derivative(&self, rate: f64, year_fraction: f64) -> f64 {
        match self {
            InterestConvention::Linear => year_fraction,
            InterestConvention::Compounded => {
                year_fraction * (1.0 + rate).powf(year_fraction - 1.0)
            }
            InterestConvention::Exponential => year_fraction * (rate * year_fraction).exp(),
        }
    }

    /// Discount factor `1 / wealth_factor`.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, year_fraction: f64) -> f64 {
        1.0 / self.wealth_factor(rate, year_fraction)
    }

    /// Rate that produces `wealth_factor` over `year_fraction`.
    ///
    /// # Errors
    ///
    /// Returns `TasaError::DomainError` when the year fraction is zero, an
    /// input is not finite, or the wealth factor is not positive under the
    /// compounded and exponential conventions.
    pub fn rate_from_wealth_factor(&self, wealth_factor: f64, year_fraction: f64) -> TasaResult<f64> {
        if !wealth_factor.is_finite() || !year_fraction.is_finite() {
            return Err(TasaError::domain(format!(
                "non-finite input: wealth factor {wealth_factor}, year fraction {year_fraction}"
            )));
        }
        if year_fraction == 0.0 {
            return Err(TasaError::domain(
                "cannot infer a rate over a zero year fraction",
            ));
        }

        let rate = match self {
            InterestConvention::Linear => (wealth_factor - 1.0) / year_fraction,
            InterestConvention::Compounded | InterestConvention::Exponential
                if wealth_factor <= 0.0 =>
            {
                return Err(TasaError::domain(format!(
                    "wealth factor must be positive, got {wealth_factor}"
                )));
            }
            InterestConvention::Compounded => wealth_factor.powf(1.0 / year_fraction) - 1.0,
            InterestConvention::Exponential => wealth_factor.ln() / year_fraction,
        };
        Ok(rate)
    }

    /// Rate that produces `discount_factor` over `year_fraction`.
    pub fn rate_from_discount_factor(&self, discount_factor: f64, year_fraction: f64) -> TasaResult<f64> {
        if discount_factor == 0.0 {
            return Err(TasaError::domain("discount factor must be non-zero"));
        }
        self.rate_from_wealth_factor(1.0 / discount_factor, year_fraction)
    }
}

impl fmt::Display for InterestConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterestConvention::Linear => "Linear",
            InterestConvention::Compounded => "Compounded",
            InterestConvention::Exponential => "Exponential",
        };
        write!(f, "{name}")
    }
}

impl FromStr for InterestConvention {
    type Err = TasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "linear" | "simple" => Ok(InterestConvention::Linear),
            "c" | "compounded" | "annual" => Ok(InterestConvention::Compounded),
            "e" | "exponential" | "continuous" => Ok(InterestConvention::Exponential),
            _ => Err(TasaError::parse(s, "interest convention")),
        }
    }
}
