//! Z-spread over a zero-coupon curve.

use tasa_core::rates::Rate;
use tasa_core::types::Date;
use tasa_curves::ZeroCouponCurve;
use tasa_math::solvers::try_newton_raphson_numerical;

use crate::error::{BondError, BondResult};
use crate::instruments::Bond;

impl Bond {
    /// Parallel curve shift, in basis points, that reprices the bond to its value at `irr`.
    ///
    /// Each trial bumps `curve` through a [`BumpGuard`](tasa_curves::BumpGuard),
    /// so the curve holds its original rates again when this returns,
    /// whether the solve succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoRemainingFlows` after maturity, curve errors
    /// raised while bumping, and `BondError::Math` on non-convergence.
    pub fn z_spread(&self, asof: Date, irr: &Rate, curve: &mut ZeroCouponCurve) -> BondResult<f64> {
        self.ensure_remaining(asof)?;
        let target = self.present_value(asof, irr);

        let result = try_newton_raphson_numerical::<_, BondError>(
            |bps| {
                let bumped = curve.bump(bps)?;
                let pv = self.present_value_zc(asof, &bumped)?;
                Ok(pv - target)
            },
            self.config.z_spread_initial_guess_bps,
            &self.config.solver_config(),
        )?;
        log::debug!("z-spread {:.6}bp after {} iterations", result.root, result.iterations);
        Ok(result.root)
    }
}
