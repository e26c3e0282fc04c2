//! Interpolation schemes for curve anchors.

use std::fmt;

use serde::{Deserialize, Serialize};
use tasa_math::interpolation::{CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator, NelsonSiegel};
use tasa_math::MathResult;

use crate::error::{CurveError, CurveResult};

/// Interpolation scheme between curve anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum InterpolationType {
    /// Piecewise linear.
    Linear,
    /// Natural cubic spline.
    CubicSpline,
    /// Linear in the logarithm of the values.
    #[default]
    #[serde(rename = "loglinear")]
    LogLinear,
    /// Nelson-Siegel zero rate model fitted to the anchor rates.
    NelsonSiegelSvensson,
}

impl InterpolationType {
    /// Short name, as used in serialized configuration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CubicSpline => "cubic-spline",
            Self::LogLinear => "loglinear",
            Self::NelsonSiegelSvensson => "nelson-siegel-svensson",
        }
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_rate_interpolation() -> InterpolationType {
    InterpolationType::CubicSpline
}

/// Interpolation choice of a curve.
///
/// `discount_factors` selects how anchor discount factors are interpolated.
/// With [`InterpolationType::NelsonSiegelSvensson`] the anchor zero rates
/// are interpolated instead, using `rates`, and each interpolated rate is
/// turned into a discount factor under the curve convention.
///
/// ```rust
/// use tasa_curves::{CurveInterpolation, InterpolationType};
///
/// let interpolation = CurveInterpolation::new(
///     InterpolationType::NelsonSiegelSvensson,
///     InterpolationType::Linear,
/// )
/// .unwrap();
/// assert!(interpolation.interpolates_rates());
/// assert!(CurveInterpolation::new(InterpolationType::Linear, InterpolationType::Linear).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveInterpolation {
    /// Scheme for discount factors.
    #[serde(default)]
    pub discount_factors: InterpolationType,
    /// Scheme for zero rates.
    #[serde(default = "default_rate_interpolation")]
    pub rates: InterpolationType,
}

impl Default for CurveInterpolation {
    fn default() -> Self {
        Self {
            discount_factors: InterpolationType::LogLinear,
            rates: default_rate_interpolation(),
        }
    }
}

impl CurveInterpolation {
    /// Creates an interpolation choice.
    ///
    /// # Errors
    ///
    /// Linear interpolation of discount factors is rejected.
    pub fn new(discount_factors: InterpolationType, rates: InterpolationType) -> CurveResult<Self> {
        let interpolation = Self {
            discount_factors,
            rates,
        };
        interpolation.validate()?;
        Ok(interpolation)
    }

    /// Checks the choice, e.g. after deserialization.
    pub fn validate(&self) -> CurveResult<()> {
        if self.discount_factors == InterpolationType::Linear {
            return Err(CurveError::UnsupportedInterpolation {
                kind: InterpolationType::Linear,
                target: "discount factors",
            });
        }
        Ok(())
    }

    /// True when anchor rates, not discount factors, are interpolated.
    #[must_use]
    pub fn interpolates_rates(&self) -> bool {
        self.discount_factors == InterpolationType::NelsonSiegelSvensson
    }
}

impl fmt::Display for CurveInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interpolates_rates() {
            write!(f, "{} on rates", self.rates)
        } else {
            write!(f, "{} on discount factors", self.discount_factors)
        }
    }
}

/// An interpolator fitted to anchor values.
#[derive(Debug, Clone)]
pub(crate) enum Fitted {
    Linear(LinearInterpolator),
    CubicSpline(CubicSpline),
    LogLinear(LogLinearInterpolator),
    NelsonSiegel(NelsonSiegel),
}

impl Fitted {
    /// Fits `kind` through at least two knots.
    ///
    /// A natural spline through two knots is their chord, so that case
    /// uses linear interpolation.
    pub(crate) fn fit(kind: InterpolationType, xs: &[f64], ys: &[f64]) -> CurveResult<Self> {
        let fitted = match kind {
            InterpolationType::Linear => Self::Linear(LinearInterpolator::new(xs.to_vec(), ys.to_vec())?),
            InterpolationType::CubicSpline if xs.len() < 3 => {
                Self::Linear(LinearInterpolator::new(xs.to_vec(), ys.to_vec())?)
            }
            InterpolationType::CubicSpline => Self::CubicSpline(CubicSpline::new(xs.to_vec(), ys.to_vec())?),
            InterpolationType::LogLinear => Self::LogLinear(LogLinearInterpolator::new(xs.to_vec(), ys.to_vec())?),
            InterpolationType::NelsonSiegelSvensson => Self::NelsonSiegel(NelsonSiegel::fit(xs, ys)?),
        };
        Ok(fitted)
    }

    pub(crate) fn interpolate_many(&self, xs: &[f64]) -> MathResult<Vec<f64>> {
        match self {
            Self::Linear(i) => i.interpolate_many(xs),
            Self::CubicSpline(i) => i.interpolate_many(xs),
            Self::LogLinear(i) => i.interpolate_many(xs),
            Self::NelsonSiegel(i) => i.interpolate_many(xs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let interpolation = CurveInterpolation::default();
        assert_eq!(interpolation.discount_factors, InterpolationType::LogLinear);
        assert_eq!(interpolation.rates, InterpolationType::CubicSpline);
        assert!(!interpolation.interpolates_rates());
        assert_eq!(interpolation.to_string(), "loglinear on discount factors");
    }

    #[test]
    fn test_linear_rejected_for_discount_factors() {
        let err = CurveInterpolation::new(InterpolationType::Linear, InterpolationType::CubicSpline).unwrap_err();
        assert!(matches!(
            err,
            CurveError::UnsupportedInterpolation {
                kind: InterpolationType::Linear,
                ..
            }
        ));
        assert_eq!(err.to_string(), "linear interpolation is not supported for discount factors");
        assert!(CurveInterpolation::new(InterpolationType::NelsonSiegelSvensson, InterpolationType::Linear).is_ok());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InterpolationType::NelsonSiegelSvensson).unwrap();
        assert_eq!(json, "\"nelson-siegel-svensson\"");
        let parsed: CurveInterpolation = serde_json::from_str(r#"{"discount_factors": "cubic-spline"}"#).unwrap();
        assert_eq!(parsed.discount_factors, InterpolationType::CubicSpline);
        assert_eq!(parsed.rates, InterpolationType::CubicSpline);
        let linear: CurveInterpolation = serde_json::from_str(r#"{"discount_factors": "linear"}"#).unwrap();
        assert!(linear.validate().is_err());
        let loglinear: InterpolationType = serde_json::from_str("\"loglinear\"").unwrap();
        assert_eq!(loglinear, InterpolationType::LogLinear);
    }

    #[test]
    fn test_two_knot_spline_is_linear() {
        let fitted = Fitted::fit(InterpolationType::CubicSpline, &[1.0, 2.0], &[0.9, 0.8]).unwrap();
        assert!(matches!(fitted, Fitted::Linear(_)));
        let values = fitted.interpolate_many(&[1.5]).unwrap();
        assert!((values[0] - 0.85).abs() < 1e-15);
    }
}
