//! Interpolation methods for discount curves.
//!
//! - [`LogLinearInterpolator`]: linear in `ln(y)`; on discount factors this
//!   gives flat forwards and keeps them positive
//! - [`LinearInterpolator`]: piecewise linear
//! - [`CubicSpline`]: natural cubic spline
//! - [`NelsonSiegel`]: parametric zero rate model fitted by least squares

mod cubic_spline;
mod linear;
mod log_linear;
mod parametric;

pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;
pub use parametric::NelsonSiegel;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    /// Interpolates every point of `xs`, in order.
    fn interpolate_many(&self, xs: &[f64]) -> MathResult<Vec<f64>> {
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }
}
