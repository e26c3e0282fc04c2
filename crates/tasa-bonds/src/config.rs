//! Pricing configuration.

use serde::{Deserialize, Serialize};

use tasa_core::rates::RateConvention;
use tasa_math::solvers::SolverConfig;

use crate::error::{BondError, BondResult};

/// Numerical and rounding settings used by bond valuation.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```rust
/// use tasa_bonds::BondPricingConfig;
///
/// let config = BondPricingConfig::from_json(r#"{ "price_decimals": 2 }"#).unwrap();
/// assert_eq!(config.price_decimals, 2);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondPricingConfig {
    /// Decimal places of a price.
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,

    /// Decimal places of a par value.
    #[serde(default = "default_par_value_decimals")]
    pub par_value_decimals: u32,

    /// Decimal places of a solved rate.
    #[serde(default = "default_rate_decimals")]
    pub rate_decimals: u32,

    /// Newton tolerance on residual and step.
    #[serde(default = "default_solver_tolerance")]
    pub solver_tolerance: f64,

    /// Newton iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Rate increment of the amount correction loop.
    #[serde(default = "default_correction_step")]
    pub correction_step: f64,

    /// Step cap of the amount correction loop.
    #[serde(default = "default_max_correction_steps")]
    pub max_correction_steps: u32,

    /// Residual chain tolerance, relative to the face.
    #[serde(default = "default_residual_tolerance")]
    pub residual_tolerance: f64,

    /// Convention of the derived accrual rate (TERA).
    #[serde(default)]
    pub tera_convention: RateConvention,

    /// Starting point of the z-spread search, in basis points.
    #[serde(default)]
    pub z_spread_initial_guess_bps: f64,
}

fn default_price_decimals() -> u32 {
    4
}

fn default_par_value_decimals() -> u32 {
    8
}

fn default_rate_decimals() -> u32 {
    6
}

fn default_solver_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_correction_step() -> f64 {
    1e-6
}

fn default_max_correction_steps() -> u32 {
    10_000
}

fn default_residual_tolerance() -> f64 {
    1e-8
}

impl Default for BondPricingConfig {
    fn default() -> Self {
        Self {
            price_decimals: default_price_decimals(),
            par_value_decimals: default_par_value_decimals(),
            rate_decimals: default_rate_decimals(),
            solver_tolerance: default_solver_tolerance(),
            max_iterations: default_max_iterations(),
            correction_step: default_correction_step(),
            max_correction_steps: default_max_correction_steps(),
            residual_tolerance: default_residual_tolerance(),
            tera_convention: RateConvention::default(),
            z_spread_initial_guess_bps: 0.0,
        }
    }
}

impl BondPricingConfig {
    /// Parses a JSON object and validates it.
    pub fn from_json(json: &str) -> BondResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BondError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks tolerances and caps.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> BondResult<()> {
        let positive = [
            ("solver_tolerance", self.solver_tolerance),
            ("correction_step", self.correction_step),
            ("residual_tolerance", self.residual_tolerance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BondError::invalid_config(format!("{field} must be positive, got {value}")));
            }
        }
        if self.max_iterations == 0 {
            return Err(BondError::invalid_config("max_iterations must be at least 1"));
        }
        if self.max_correction_steps == 0 {
            return Err(BondError::invalid_config("max_correction_steps must be at least 1"));
        }
        if !self.z_spread_initial_guess_bps.is_finite() {
            return Err(BondError::invalid_config("z_spread_initial_guess_bps must be finite"));
        }
        if self.tera_convention.base == 0 {
            return Err(BondError::invalid_config("tera_convention base must be positive"));
        }
        Ok(())
    }

    /// Newton settings derived from this configuration.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.solver_tolerance, self.max_iterations)
    }
}
