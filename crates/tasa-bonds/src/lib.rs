//! # Tasa Bonds
//!
//! Amortizing fixed-rate bond valuation for the Tasa valuation core.
//!
//! This crate provides:
//!
//! - **Coupons**: accrual periods with amortization, interest and residual
//! - **Instruments**: [`Bond`], normalized to a face of 100 with a derived
//!   accrual rate (TERA), and single-payment [`Deposit`]s
//! - **Pricing**: present value against a flat rate or a curve, par value,
//!   price, settlement amount, yield from present value or amount, z-spread
//! - **Risk**: duration and DV01
//!
//! ## Example
//!
//! ```rust
//! use tasa_bonds::prelude::*;
//! use tasa_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 1, 1).unwrap();
//! let coupon = Coupon::new(100.0, 3.0, 100.0, start, end).unwrap();
//! let bond = Bond::new(1_000_000.0, Currency::CLP, vec![coupon]).unwrap();
//!
//! // The accrual rate prices the bond at par on its start date
//! let pv = bond.present_value(start, bond.tera());
//! assert!((pv - 100.0).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod coupons;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod risk;

pub use config::BondPricingConfig;
pub use coupons::Coupon;
pub use error::{BondError, BondResult};
pub use instruments::{Bond, BondBuilder, Deposit};
pub use risk::RiskMetrics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::BondPricingConfig;
    pub use crate::coupons::Coupon;
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{Bond, BondBuilder, Deposit};
    pub use crate::risk::RiskMetrics;
}
