//! Yield solvers: from a present value and from a settlement amount.

use tasa_core::rates::{Rate, RateConvention};
use tasa_core::types::{round_to, Date};
use tasa_math::solvers::try_newton_raphson;

use crate::error::{BondError, BondResult};
use crate::instruments::{Bond, FACE};

impl Bond {
    /// Rate under `convention` at which the present value on `asof` equals `target`.
    ///
    /// Newton's method with the analytic derivative, starting from
    /// `initial_guess` or the TERA value.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoRemainingFlows` after maturity and
    /// `BondError::Math` when the solver does not converge within
    /// `config.max_iterations`.
    pub fn irr_from_present_value(
        &self,
        asof: Date,
        target: f64,
        convention: RateConvention,
        initial_guess: Option<f64>,
    ) -> BondResult<Rate> {
        self.ensure_remaining(asof)?;
        if !target.is_finite() {
            return Err(BondError::invalid_spec(format!("target present value is not finite: {target}")));
        }

        let guess = initial_guess.unwrap_or(self.tera.value);
        let result = try_newton_raphson::<_, BondError>(
            |y| {
                let rate = Rate::new(convention, y);
                Ok((
                    self.present_value(asof, &rate) - target,
                    self.present_value_derivative(asof, &rate),
                ))
            },
            guess,
            &self.config.solver_config(),
        )?;
        Ok(Rate::new(convention, result.root))
    }

    /// Rate under `convention` whose rounded settlement amount at `fx` equals `target`.
    ///
    /// Solves on the unrounded amount first, rounds the rate to
    /// `config.rate_decimals`, then walks it by `config.correction_step`
    /// until the rounded amount crosses the target. The settlement amount
    /// falls as the rate rises, so an amount above target steps the rate
    /// up. The walk stops on the first sign change (or an exact hit) and
    /// keeps whichever of the last two rates is closer to the target.
    ///
    /// # Errors
    ///
    /// Returns `BondError::CorrectionFailed` if the sign does not change
    /// within `config.max_correction_steps`.
    pub fn irr_from_amount(&self, asof: Date, target: f64, convention: RateConvention, fx: f64) -> BondResult<Rate> {
        self.ensure_remaining(asof)?;
        if !(fx.is_finite() && fx > 0.0) {
            return Err(BondError::invalid_spec(format!("fx must be positive, got {fx}")));
        }
        if !target.is_finite() {
            return Err(BondError::invalid_spec(format!("target amount is not finite: {target}")));
        }

        let scale = (self.notional / 1_000.0).min(10.0);
        let money = self.notional * fx / FACE;
        let result = try_newton_raphson::<_, BondError>(
            |y| {
                let rate = Rate::new(convention, y);
                Ok((
                    (money * self.present_value(asof, &rate) - target) / scale,
                    money * self.present_value_derivative(asof, &rate) / scale,
                ))
            },
            self.tera.value,
            &self.config.solver_config(),
        )?;

        let base = round_to(result.root, self.config.rate_decimals)?;
        self.correct_amount(asof, target, convention, fx, base)
    }

    fn correct_amount(
        &self,
        asof: Date,
        target: f64,
        convention: RateConvention,
        fx: f64,
        base: f64,
    ) -> BondResult<Rate> {
        let error_at = |y: f64| -> BondResult<f64> {
            Ok(self.amount_value(asof, &Rate::new(convention, y), fx)? - target)
        };

        let mut previous_rate = base;
        let mut previous_error = error_at(base)?;
        if previous_error == 0.0 {
            return Ok(Rate::new(convention, base));
        }
        let direction = if previous_error > 0.0 { 1.0 } else { -1.0 };
        let step = self.config.correction_step;

        for k in 1..=self.config.max_correction_steps {
            let candidate = base + direction * step * f64::from(k);
            let error = error_at(candidate)?;
            if error == 0.0 {
                log::debug!("amount correction hit target after {k} steps: rate={candidate}");
                return Ok(Rate::new(convention, candidate));
            }
            if error.signum() != previous_error.signum() {
                let chosen = if error.abs() > previous_error.abs() {
                    previous_rate
                } else {
                    candidate
                };
                log::debug!("amount correction flipped after {k} steps: rate={chosen}");
                return Ok(Rate::new(convention, chosen));
            }
            previous_rate = candidate;
            previous_error = error;
        }

        log::warn!(
            "amount correction did not flip after {} steps: rate={previous_rate}, error={previous_error}",
            self.config.max_correction_steps
        );
        Err(BondError::CorrectionFailed {
            steps: self.config.max_correction_steps,
            rate: previous_rate,
            error: previous_error,
        })
    }
}
