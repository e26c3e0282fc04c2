//! Risk metrics for bonds.

use tasa_core::daycounts::DayCountConvention;
use tasa_core::rates::Rate;
use tasa_core::types::Date;
use tasa_math::MathError;

use crate::error::BondResult;
use crate::instruments::{Bond, FACE};

/// Duration and DV01 of a holding at one yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    /// Present-value weighted average time to payment, in years.
    pub duration: f64,
    /// Change in holding value for one basis point, in currency units.
    pub dv01: f64,
}

impl Bond {
    /// Duration in Actual/365 years of the flows after `asof`, weighted by their value at `irr`.
    pub fn duration(&self, asof: Date, irr: &Rate) -> BondResult<f64> {
        self.duration_with_convention(asof, irr, DayCountConvention::Actual, 365)
    }

    /// Duration measuring time with `day_count` over `base`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoRemainingFlows` after maturity and a division
    /// error when the remaining flows are worth nothing.
    pub fn duration_with_convention(
        &self,
        asof: Date,
        irr: &Rate,
        day_count: DayCountConvention,
        base: u32,
    ) -> BondResult<f64> {
        self.ensure_remaining(asof)?;
        let (weighted, total) = self
            .remaining_coupons(asof)
            .map(|c| {
                let pv = c.flow() * irr.discount_factor(asof, c.end());
                (pv * day_count.year_fraction(asof, c.end(), base), pv)
            })
            .fold((0.0, 0.0), |(w, t), (pw, pv)| (w + pw, t + pv));
        if total == 0.0 {
            return Err(MathError::DivisionByZero { value: total }.into());
        }
        Ok(weighted / total)
    }

    /// Value change of the holding for one basis point: `-PV * duration / 10_000`, scaled by `notional / 100`.
    pub fn dv01(&self, asof: Date, irr: &Rate) -> BondResult<f64> {
        let duration = self.duration(asof, irr)?;
        Ok(self.dv01_from_duration(asof, irr, duration))
    }

    /// Duration and DV01 together.
    pub fn risk_metrics(&self, asof: Date, irr: &Rate) -> BondResult<RiskMetrics> {
        let duration = self.duration(asof, irr)?;
        Ok(RiskMetrics {
            duration,
            dv01: self.dv01_from_duration(asof, irr, duration),
        })
    }

    fn dv01_from_duration(&self, asof: Date, irr: &Rate, duration: f64) -> f64 {
        -self.present_value(asof, irr) * duration / 10_000.0 * (self.notional / FACE)
    }
}
