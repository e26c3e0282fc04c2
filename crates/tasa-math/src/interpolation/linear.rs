//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Piecewise linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use tasa_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.04, 0.05]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 0.045).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths differ
    /// or the xs are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        check_knots(&xs, &ys, 2)?;
        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation of the first and last segments.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    fn segment(&self, x: f64) -> MathResult<(usize, f64)> {
        if !(self.allow_extrapolation || self.in_range(x)) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        let i = find_segment(&self.xs, x);
        let slope = (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok((i, slope))
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (i, slope) = self.segment(x)?;
        Ok(self.ys[i] + (x - self.xs[i]) * slope)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        Ok(self.segment(x)?.1)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Validates knot vectors shared by the piecewise interpolators.
pub(crate) fn check_knots(xs: &[f64], ys: &[f64], required: usize) -> MathResult<()> {
    if xs.len() < required {
        return Err(MathError::insufficient_data(required, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input("x values must be strictly increasing"));
    }
    if let Some((i, y)) = ys.iter().enumerate().find(|(_, y)| !y.is_finite()) {
        return Err(MathError::invalid_input(format!("y[{i}] = {y} is not finite")));
    }
    Ok(())
}

/// Index i such that xs[i] <= x < xs[i+1], clamped to the outer segments.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let last = xs.len() - 2;
    match xs.binary_search_by(|probe| probe.total_cmp(&x)) {
        Ok(i) => i.min(last),
        Err(i) => i.saturating_sub(1).min(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_passes_through_knots() {
        let xs = vec![0.5, 1.0, 3.0];
        let ys = vec![0.051, 0.048, 0.045];
        let interp = LinearInterpolator::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_midpoint_and_slope() {
        let interp = LinearInterpolator::new(vec![1.0, 3.0], vec![0.04, 0.06]).unwrap();
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 0.05, epsilon = 1e-15);
        assert_relative_eq!(interp.derivative(2.5).unwrap(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_extrapolation() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            interp.interpolate(3.0),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        let interp = interp.with_extrapolation();
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 3.0, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_validation() {
        assert!(LinearInterpolator::new(vec![1.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 2.0], vec![1.0, f64::NAN]).is_err());
    }
}
