//! Bond instrument and builder, plus single-payment deposits.
//!
//! A [`Bond`] holds its coupons normalized to a face of 100. Values it
//! returns per unit of face (present value, par value, price) are on that
//! scale; money amounts (settlement amount, DV01) are scaled back by
//! `notional / 100`.

use std::fmt;

use tasa_core::rates::Rate;
use tasa_core::types::{round_to, Currency, Date};

use crate::config::BondPricingConfig;
use crate::coupons::Coupon;
use crate::error::{BondError, BondResult};

mod deposit;

pub use deposit::{Deposit, DEFAULT_DURATION_BASE};

/// Face every schedule is normalized to.
pub const FACE: f64 = 100.0;

/// An amortizing fixed-rate bond.
///
/// # Example
///
/// ```rust
/// use tasa_bonds::prelude::*;
/// use tasa_core::prelude::*;
///
/// let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
/// let coupons = vec![
///     Coupon::new(500.0, 20.0, 1000.0, d(2024, 1, 1), d(2024, 7, 1)).unwrap(),
///     Coupon::new(500.0, 10.0, 500.0, d(2024, 7, 1), d(2025, 1, 1)).unwrap(),
/// ];
/// let bond = Bond::builder()
///     .notional(5_000_000.0)
///     .currency(Currency::CLP)
///     .coupons(coupons)
///     .build()
///     .unwrap();
///
/// // Schedules are normalized to a face of 100
/// assert_eq!(bond.coupons()[0].residual(), 100.0);
/// assert_eq!(bond.coupons()[1].amortization(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub(crate) notional: f64,
    pub(crate) currency: Currency,
    pub(crate) coupons: Vec<Coupon>,
    pub(crate) tera: Rate,
    pub(crate) config: BondPricingConfig,
}

impl Bond {
    /// Builds a bond with default configuration and a derived TERA.
    pub fn new(notional: f64, currency: Currency, coupons: Vec<Coupon>) -> BondResult<Self> {
        Self::builder()
            .notional(notional)
            .currency(currency)
            .coupons(coupons)
            .build()
    }

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::default()
    }

    /// Nominal amount held.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Coupons sorted by start date, normalized to a face of 100.
    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Accrual rate (TERA) used for par value.
    #[must_use]
    pub fn tera(&self) -> &Rate {
        &self.tera
    }

    /// Pricing configuration.
    #[must_use]
    pub fn config(&self) -> &BondPricingConfig {
        &self.config
    }

    /// First accrual date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.coupons[0].start()
    }

    /// Last payment date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.coupons[self.coupons.len() - 1].end()
    }

    /// Coupons paid strictly after `asof`.
    pub fn remaining_coupons(&self, asof: Date) -> impl Iterator<Item = &Coupon> + '_ {
        self.coupons.iter().filter(move |c| c.end() > asof)
    }

    /// The coupon accruing on `asof`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::NoCurrentCoupon` before issue, on or after
    /// maturity, and inside a gap between coupons.
    pub fn current_coupon(&self, asof: Date) -> BondResult<&Coupon> {
        self.coupons
            .iter()
            .find(|c| c.contains(asof))
            .ok_or(BondError::NoCurrentCoupon { date: asof })
    }

    /// Fails with `NoRemainingFlows` when nothing is paid after `asof`.
    pub(crate) fn ensure_remaining(&self, asof: Date) -> BondResult<()> {
        if asof < self.maturity() {
            Ok(())
        } else {
            Err(BondError::NoRemainingFlows { date: asof })
        }
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond({} {}, {} coupons, {} -> {}, tera {})",
            self.notional,
            self.currency,
            self.coupons.len(),
            self.issue_date(),
            self.maturity(),
            self.tera
        )
    }
}

/// Builder for [`Bond`].
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    notional: Option<f64>,
    currency: Currency,
    coupons: Vec<Coupon>,
    tera: Option<Rate>,
    config: BondPricingConfig,
}

impl BondBuilder {
    /// Sets the nominal amount held.
    #[must_use]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the coupon schedule, in any order and at any face.
    #[must_use]
    pub fn coupons(mut self, coupons: Vec<Coupon>) -> Self {
        self.coupons = coupons;
        self
    }

    /// Appends one coupon.
    #[must_use]
    pub fn coupon(mut self, coupon: Coupon) -> Self {
        self.coupons.push(coupon);
        self
    }

    /// Sets the accrual rate instead of deriving it.
    #[must_use]
    pub fn tera(mut self, tera: Rate) -> Self {
        self.tera = Some(tera);
        self
    }

    /// Sets the pricing configuration.
    #[must_use]
    pub fn config(mut self, config: BondPricingConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the bond.
    ///
    /// Coupons are sorted by start date and rescaled so the first residual
    /// is 100. Without an explicit TERA, the rate under
    /// `config.tera_convention` that prices the bond at 100 on its issue
    /// date is solved for and rounded to `config.rate_decimals`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notional is missing or not positive, the
    /// schedule is empty or overlapping, a residual disagrees with the
    /// amortizations still due, or the TERA solve fails.
    pub fn build(self) -> BondResult<Bond> {
        let notional = self.notional.ok_or_else(|| BondError::missing_field("notional"))?;
        if !(notional.is_finite() && notional > 0.0) {
            return Err(BondError::invalid_spec(format!("notional must be positive, got {notional}")));
        }
        self.config.validate()?;

        let mut coupons = self.coupons;
        if coupons.is_empty() {
            return Err(BondError::invalid_spec("bond has no coupons"));
        }
        coupons.sort_by_key(Coupon::start);
        for pair in coupons.windows(2) {
            if pair[1].start() == pair[0].start() {
                return Err(BondError::invalid_spec(format!(
                    "two coupons start on {}",
                    pair[0].start()
                )));
            }
            if pair[1].start() < pair[0].end() {
                return Err(BondError::invalid_spec(format!(
                    "coupon starting {} overlaps coupon ending {}",
                    pair[1].start(),
                    pair[0].end()
                )));
            }
        }

        let factor = FACE / coupons[0].residual();
        let coupons: Vec<Coupon> = coupons.iter().map(|c| c.scaled(factor)).collect();
        check_residuals(&coupons, self.config.residual_tolerance)?;

        let mut bond = Bond {
            notional,
            currency: self.currency,
            coupons,
            tera: Rate::new(self.config.tera_convention, 0.0),
            config: self.config,
        };
        bond.tera = match self.tera {
            Some(tera) => tera,
            None => derive_tera(&bond)?,
        };
        Ok(bond)
    }
}

/// Every residual must equal the amortizations from its coupon onwards.
fn check_residuals(coupons: &[Coupon], tolerance: f64) -> BondResult<()> {
    let mut remaining = 0.0;
    for (index, coupon) in coupons.iter().enumerate().rev() {
        remaining += coupon.amortization();
        if (coupon.residual() - remaining).abs() > tolerance * FACE {
            return Err(BondError::ResidualMismatch {
                index,
                residual: coupon.residual(),
                expected: remaining,
            });
        }
    }
    Ok(())
}

fn derive_tera(bond: &Bond) -> BondResult<Rate> {
    let convention = bond.config.tera_convention;
    let first = &bond.coupons[0];
    let guess = first.rate().convert(convention, first.start(), first.end())?;
    let irr = bond.irr_from_present_value(first.start(), FACE, convention, Some(guess.value))?;
    let tera = Rate::new(convention, round_to(irr.value, bond.config.rate_decimals)?);
    log::debug!("derived tera {tera} for bond issued {}", first.start());
    Ok(tera)
}
