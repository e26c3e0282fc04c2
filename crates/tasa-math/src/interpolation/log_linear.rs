//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Log-linear interpolation between data points.
///
/// ```text
/// y(x) = exp(ln y0 + (x - x0) / (x1 - x0) * (ln y1 - ln y0))
/// ```
///
/// Applied to discount factors against year fractions this is the
/// flat-forward scheme: the instantaneous forward rate is constant between
/// consecutive knots.
///
/// # Example
///
/// ```rust
/// use tasa_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let times = vec![0.5, 1.0, 2.0];
/// let discount_factors = vec![0.985, 0.97, 0.94];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    log_ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths differ,
    /// the xs are not strictly increasing or any y is not positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
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

        let log_ys = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                if y > 0.0 && y.is_finite() {
                    Ok(y.ln())
                } else {
                    Err(MathError::invalid_input(format!(
                        "y[{i}] = {y} is not positive; log-linear requires positive values"
                    )))
                }
            })
            .collect::<MathResult<Vec<_>>>()?;

        Ok(Self {
            xs,
            ys,
            log_ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation of the first and last segments.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the original y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }

    /// Returns the x values.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.xs
    }

    /// Index i such that xs[i] <= x < xs[i+1], clamped to the outer segments.
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        match self.xs.binary_search_by(|probe| probe.total_cmp(&x)) {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.allow_extrapolation || self.in_range(x) {
            Ok(())
        } else {
            Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            })
        }
    }

    /// Log value and log slope at x.
    fn log_value(&self, x: f64) -> (f64, f64) {
        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (l0, l1) = (self.log_ys[i], self.log_ys[i + 1]);
        let slope = (l1 - l0) / (x1 - x0);
        (l0 + (x - x0) * slope, slope)
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.log_value(x).0.exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (log_y, slope) = self.log_value(x);
        Ok(log_y.exp() * slope)
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
