//! # Tasa Math
//!
//! Numerical building blocks for the Tasa valuation core.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson root finding with analytic or numerical derivatives
//! - **Interpolation**: Log-linear, linear and natural cubic spline interpolators and a
//!   fitted Nelson-Siegel model

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::single_match_else)]
#![allow(clippy::derivable_impls)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator, NelsonSiegel,
    };
    pub use crate::solvers::{newton_raphson, newton_raphson_numerical, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
