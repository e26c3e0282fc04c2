//! # Tasa Curves
//!
//! Zero-coupon discount curves for the Tasa valuation core.
//!
//! A [`ZeroCouponCurve`] is built from dated zero rates (or discount
//! factors) and answers discount factor, wealth factor, forward and zero
//! rate queries for arbitrary dates:
//!
//! - between anchors, `ln(df)` is interpolated linearly in the curve's year
//!   fraction (flat forwards) unless another [`CurveInterpolation`] is chosen;
//! - outside the anchors, the nearest anchor's own rate discounts directly;
//! - parallel bumps are applied as a separate shift over the stored rates so
//!   that they can be reverted exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use tasa_core::prelude::*;
//! use tasa_curves::prelude::*;
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let conv = RateConvention::default();
//! let curve = ZeroCouponCurve::new(
//!     today,
//!     vec![
//!         ZeroCouponCurvePoint::new(Date::from_ymd(2024, 7, 2).unwrap(), Rate::new(conv, 0.050)),
//!         ZeroCouponCurvePoint::new(Date::from_ymd(2025, 1, 2).unwrap(), Rate::new(conv, 0.048)),
//!         ZeroCouponCurvePoint::new(Date::from_ymd(2027, 1, 2).unwrap(), Rate::new(conv, 0.045)),
//!     ],
//! )
//! .unwrap();
//!
//! let df = curve.get_df(Date::from_ymd(2026, 1, 2).unwrap()).unwrap();
//! assert!(df > 0.85 && df < 0.95);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod cache;
pub mod curve;
pub mod error;
pub mod interpolation;
pub mod point;

pub use curve::{BumpGuard, ZeroCouponCurve};
pub use error::{CurveError, CurveResult};
pub use interpolation::{CurveInterpolation, InterpolationType};
pub use point::ZeroCouponCurvePoint;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{BumpGuard, ZeroCouponCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::interpolation::{CurveInterpolation, InterpolationType};
    pub use crate::point::ZeroCouponCurvePoint;
}
