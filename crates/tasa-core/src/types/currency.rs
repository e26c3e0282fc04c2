//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TasaError;

/// ISO 4217 currency codes in which bonds are denominated and settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// Chilean Peso
    #[default]
    CLP,
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Brazilian Real
    BRL,
    /// Colombian Peso
    COP,
    /// Mexican Peso
    MXN,
    /// Peruvian Sol
    PEN,
    /// Chinese Yuan Renminbi
    CNY,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CLP => "CLP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::BRL => "BRL",
            Currency::COP => "COP",
            Currency::MXN => "MXN",
            Currency::PEN => "PEN",
            Currency::CNY => "CNY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }

    /// Parses a currency from a string code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "CLP" => Some(Currency::CLP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CHF" => Some(Currency::CHF),
            "BRL" => Some(Currency::BRL),
            "COP" => Some(Currency::COP),
            "MXN" => Some(Currency::MXN),
            "PEN" => Some(Currency::PEN),
            "CNY" => Some(Currency::CNY),
            "AUD" => Some(Currency::AUD),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = TasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| TasaError::parse(s, "currency"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("clp"), Some(Currency::CLP));
        assert_eq!(Currency::from_code(" USD "), Some(Currency::USD));
        assert_eq!(Currency::from_code("XXX"), None);
        assert!("UF".parse::<Currency>().is_err());
    }

    #[test]
    fn test_canadian_dollar() {
        assert_eq!(Currency::from_code("cad"), Some(Currency::CAD));
        assert_eq!("CAD".parse::<Currency>().unwrap().to_string(), "CAD");
        assert_eq!(serde_json::to_string(&Currency::CAD).unwrap(), "\"CAD\"");
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Currency::PEN.to_string(), "PEN");
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Currency::EUR);
    }
}
