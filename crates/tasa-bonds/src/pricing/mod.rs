//! Bond valuation.
//!
//! This module provides, as methods on [`Bond`]:
//! - present value against a flat rate or a zero-coupon curve
//! - accrued interest, par value, price and settlement amount
//! - yield from a present value or a settlement amount (`yield_solver`)
//! - z-spread over a curve (`spread`)
//!
//! Prices and par values are rounded on their decimal form with
//! [`round_to`], as settlement figures are quoted.

mod spread;
mod yield_solver;

use tasa_core::rates::Rate;
use tasa_core::types::{round_to, Date};
use tasa_curves::ZeroCouponCurve;

use crate::error::BondResult;
use crate::instruments::{Bond, FACE};

impl Bond {
    /// Present value per 100 of face of the flows paid after `asof`.
    ///
    /// Flows paid on or before `asof` are excluded; a matured bond is worth 0.
    #[must_use]
    pub fn present_value(&self, asof: Date, rate: &Rate) -> f64 {
        self.remaining_coupons(asof)
            .map(|c| c.flow() * rate.discount_factor(asof, c.end()))
            .sum()
    }

    /// Derivative of [`present_value`](Self::present_value) with respect to the rate value.
    #[must_use]
    pub fn present_value_derivative(&self, asof: Date, rate: &Rate) -> f64 {
        self.remaining_coupons(asof)
            .map(|c| c.flow() * rate.discount_factor_derivative(asof, c.end()))
            .sum()
    }

    /// Present value per 100 of face discounted on `curve`, seen from `asof`.
    ///
    /// Each flow is discounted with `df(end) / df(asof)`.
    pub fn present_value_zc(&self, asof: Date, curve: &ZeroCouponCurve) -> BondResult<f64> {
        let (ends, flows): (Vec<Date>, Vec<f64>) = self.remaining_coupons(asof).map(|c| (c.end(), c.flow())).unzip();
        if ends.is_empty() {
            return Ok(0.0);
        }
        let dfs = curve.get_dfs(&ends)?;
        let df_asof = curve.get_df(asof)?;
        Ok(flows.iter().zip(&dfs).map(|(flow, df)| flow * df).sum::<f64>() / df_asof)
    }

    /// Interest accrued on the current coupon up to `asof`.
    ///
    /// Accrues at the TERA unless `rate` is given.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoCurrentCoupon` when no coupon accrues on `asof`.
    pub fn accrued_interest(&self, asof: Date, rate: Option<&Rate>) -> BondResult<f64> {
        let coupon = self.current_coupon(asof)?;
        Ok(coupon.accrued_interest(asof, rate.unwrap_or(&self.tera)))
    }

    /// Current residual plus interest accrued at the TERA, per 100 of face.
    pub fn par_value(&self, asof: Date) -> BondResult<f64> {
        let coupon = self.current_coupon(asof)?;
        let par = coupon.residual() + coupon.accrued_interest(asof, &self.tera);
        Ok(round_to(par, self.config.par_value_decimals)?)
    }

    /// Present value at `irr` as a percentage of par value.
    pub fn price(&self, asof: Date, irr: &Rate) -> BondResult<f64> {
        let par = self.par_value(asof)?;
        let price = FACE * self.present_value(asof, irr) / par;
        Ok(round_to(price, self.config.price_decimals)?)
    }

    /// Settlement amount of the holding at `irr`, converted with `fx`.
    ///
    /// The amount is `notional * price * par / 10_000`, rounded to 8
    /// decimals when `fx != 1`, then converted and rounded to a whole unit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tasa_bonds::prelude::*;
    /// use tasa_core::prelude::*;
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2025, 1, 1).unwrap();
    /// let coupon = Coupon::new(100.0, 3.0, 100.0, start, end).unwrap();
    /// let bond = Bond::new(1_000_000.0, Currency::CLP, vec![coupon]).unwrap();
    ///
    /// let amount = bond.amount_value(start, bond.tera(), 1.0).unwrap();
    /// assert_eq!(amount, 1_000_000.0);
    /// ```
    pub fn amount_value(&self, asof: Date, irr: &Rate, fx: f64) -> BondResult<f64> {
        let price = self.price(asof, irr)?;
        let par = self.par_value(asof)?;
        let mut amount = self.notional * price * par / (FACE * FACE);
        if fx != 1.0 {
            amount = round_to(amount, 8)?;
        }
        Ok(round_to(amount * fx, 0)?)
    }
}
