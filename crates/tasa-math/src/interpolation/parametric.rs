//! Nelson-Siegel zero rate model.
//!
//! Unlike the piecewise interpolators the model is fitted to the data by
//! least squares and is defined for every positive time.

use crate::error::{MathError, MathResult};
use crate::interpolation::linear::check_knots;
use crate::interpolation::Interpolator;

/// Search range for the decay factor when fitting, in years.
const TAU_RANGE: (f64, f64) = (0.02, 50.0);
const TAU_GRID: usize = 64;
const TAU_TOLERANCE: f64 = 1e-12;
const MAX_GOLDEN_STEPS: u32 = 200;

/// Nelson-Siegel zero rate model.
///
/// ```text
/// z(t) = β₀ + β₁ * (1 - e^(-t/τ)) / (t/τ)
///           + β₂ * ((1 - e^(-t/τ)) / (t/τ) - e^(-t/τ))
/// ```
///
/// - β₀: long-run level
/// - β₀ + β₁: instantaneous short rate
/// - β₂: hump (β₂ > 0) or trough (β₂ < 0)
/// - τ: decay factor, roughly where the hump peaks
///
/// # Example
///
/// ```rust
/// use tasa_math::interpolation::{Interpolator, NelsonSiegel};
///
/// let ns = NelsonSiegel::new(0.045, -0.02, 0.01, 2.0).unwrap();
/// assert!(ns.interpolate(0.25).unwrap() < ns.interpolate(30.0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelsonSiegel {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    tau: f64,
}

impl NelsonSiegel {
    /// Creates a model from its parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if tau is not positive.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> MathResult<Self> {
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(MathError::invalid_input(format!("tau must be positive, got {tau}")));
        }
        Ok(Self {
            beta0,
            beta1,
            beta2,
            tau,
        })
    }

    /// Least-squares fit of the model to zero rates `ys` at times `xs`.
    ///
    /// For a fixed τ the betas solve a linear least-squares problem; τ
    /// itself is located by a grid scan followed by golden-section search on
    /// `ln τ`.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than 3 points, mismatched lengths,
    /// non-increasing or non-positive times, or when no τ in the search
    /// range gives a solvable system.
    pub fn fit(xs: &[f64], ys: &[f64]) -> MathResult<Self> {
        check_knots(xs, ys, 3)?;
        if xs[0] <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "times must be positive, got {}",
                xs[0]
            )));
        }

        let objective = |log_tau: f64| fit_betas(xs, ys, log_tau.exp()).map_or(f64::INFINITY, |(_, sse)| sse);

        let (lo, hi) = (TAU_RANGE.0.ln(), TAU_RANGE.1.ln());
        let step = (hi - lo) / (TAU_GRID - 1) as f64;
        let grid: Vec<f64> = (0..TAU_GRID).map(|i| lo + step * i as f64).collect();
        let best = grid
            .iter()
            .map(|&g| objective(g))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(i, _)| i);
        if !objective(grid[best]).is_finite() {
            log::warn!("nelson-siegel fit: no solvable decay factor in {TAU_RANGE:?}");
            return Err(MathError::invalid_input("no decay factor gives a solvable fit"));
        }

        let mut a = grid[best.saturating_sub(1)];
        let mut b = grid[(best + 1).min(TAU_GRID - 1)];
        let ratio = (5f64.sqrt() - 1.0) / 2.0;
        let mut c = b - ratio * (b - a);
        let mut d = a + ratio * (b - a);
        let (mut fc, mut fd) = (objective(c), objective(d));
        let mut steps = 0;
        while b - a > TAU_TOLERANCE && steps < MAX_GOLDEN_STEPS {
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - ratio * (b - a);
                fc = objective(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + ratio * (b - a);
                fd = objective(d);
            }
            steps += 1;
        }

        // The bracket ends were scanned too; keep whichever point is best.
        let tau = [a, (a + b) / 2.0, b, grid[best]]
            .into_iter()
            .min_by(|x, y| objective(*x).total_cmp(&objective(*y)))
            .unwrap_or(grid[best])
            .exp();
        let ([beta0, beta1, beta2], sse) = fit_betas(xs, ys, tau)?;
        log::debug!("nelson-siegel fit: tau={tau:.6} sse={sse:.3e} after {steps} golden steps");
        Self::new(beta0, beta1, beta2, tau)
    }

    /// Returns the instantaneous forward rate at time t.
    ///
    /// ```text
    /// f(t) = β₀ + β₁ * e^(-t/τ) + β₂ * (t/τ) * e^(-t/τ)
    /// ```
    pub fn forward_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x = t / self.tau;
        let exp_x = (-x).exp();
        self.beta0 + self.beta1 * exp_x + self.beta2 * x * exp_x
    }

    /// Returns the model parameters as (β₀, β₁, β₂, τ).
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.beta0, self.beta1, self.beta2, self.tau)
    }
}

/// (1 - e^(-x)) / x
fn loading_1(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0 - x / 2.0 + x * x / 6.0
    } else {
        (1.0 - (-x).exp()) / x
    }
}

/// (1 - e^(-x)) / x - e^(-x)
fn loading_2(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        x / 2.0 - x * x / 3.0
    } else {
        loading_1(x) - (-x).exp()
    }
}

/// Betas minimising the squared error for a fixed τ, with that error.
fn fit_betas(xs: &[f64], ys: &[f64], tau: f64) -> MathResult<([f64; 3], f64)> {
    let mut ata = [[0.0; 3]; 3];
    let mut aty = [0.0; 3];
    for (&t, &y) in xs.iter().zip(ys) {
        let row = [1.0, loading_1(t / tau), loading_2(t / tau)];
        for i in 0..3 {
            aty[i] += row[i] * y;
            for j in 0..3 {
                ata[i][j] += row[i] * row[j];
            }
        }
    }
    let betas = solve_3x3(ata, aty)?;
    let sse = xs
        .iter()
        .zip(ys)
        .map(|(&t, &y)| {
            let x = t / tau;
            let fitted = betas[0] + betas[1] * loading_1(x) + betas[2] * loading_2(x);
            (fitted - y).powi(2)
        })
        .sum();
    Ok((betas, sse))
}

/// Gaussian elimination with partial pivoting.
fn solve_3x3(mut m: [[f64; 3]; 3], mut v: [f64; 3]) -> MathResult<[f64; 3]> {
    let scale = m.iter().flatten().fold(0.0f64, |acc, x| acc.max(x.abs()));
    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() <= scale * 1e-14 {
            return Err(MathError::DivisionByZero { value: m[pivot][col] });
        }
        m.swap(col, pivot);
        v.swap(col, pivot);
        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..3 {
                m[row][k] -= factor * m[col][k];
            }
            v[row] -= factor * v[col];
        }
    }
    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * x[k]).sum();
        x[row] = (v[row] - tail) / m[row][row];
    }
    Ok(x)
}

impl Interpolator for NelsonSiegel {
    fn interpolate(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            return Ok(self.beta0 + self.beta1);
        }
        let x = t / self.tau;
        Ok(self.beta0 + self.beta1 * loading_1(x) + self.beta2 * loading_2(x))
    }

    fn derivative(&self, t: f64) -> MathResult<f64> {
        if t <= 0.0 {
            return Ok(0.0);
        }
        let x = t / self.tau;
        let dl1 = ((-x).exp() - loading_1(x)) / x;
        let dl2 = dl1 + (-x).exp();
        Ok((self.beta1 * dl1 + self.beta2 * dl2) / self.tau)
    }

    fn allows_extrapolation(&self) -> bool {
        true
    }

    fn min_x(&self) -> f64 {
        0.0
    }

    fn max_x(&self) -> f64 {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TIMES: [f64; 9] = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0];

    #[test]
    fn test_limits() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 2.0).unwrap();
        assert_relative_eq!(ns.interpolate(0.0).unwrap(), 0.03, epsilon = 1e-15);
        assert_relative_eq!(ns.interpolate(1e-12).unwrap(), 0.03, epsilon = 1e-10);
        assert_relative_eq!(ns.interpolate(1000.0).unwrap(), 0.05, epsilon = 1e-3);
        assert_relative_eq!(ns.forward_rate(0.0), 0.03, epsilon = 1e-15);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let ns = NelsonSiegel::new(0.045, -0.015, 0.02, 1.5).unwrap();
        let h = 1e-6;
        for t in [0.5, 2.0, 8.0] {
            let fd = (ns.interpolate(t + h).unwrap() - ns.interpolate(t - h).unwrap()) / (2.0 * h);
            assert_relative_eq!(ns.derivative(t).unwrap(), fd, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_fit_recovers_model_rates() {
        let model = NelsonSiegel::new(0.045, -0.02, 0.01, 2.0).unwrap();
        let ys: Vec<f64> = TIMES.iter().map(|&t| model.interpolate(t).unwrap()).collect();
        let fitted = NelsonSiegel::fit(&TIMES, &ys).unwrap();
        for (&t, &y) in TIMES.iter().zip(&ys) {
            assert_relative_eq!(fitted.interpolate(t).unwrap(), y, epsilon = 1e-8);
        }
        assert_relative_eq!(fitted.parameters().3, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fit_flat_rates() {
        let ys = vec![0.04; TIMES.len()];
        let fitted = NelsonSiegel::fit(&TIMES, &ys).unwrap();
        for &t in &TIMES {
            assert_relative_eq!(fitted.interpolate(t).unwrap(), 0.04, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_fit_validation() {
        assert!(matches!(
            NelsonSiegel::fit(&[1.0, 2.0], &[0.04, 0.05]),
            Err(MathError::InsufficientData { required: 3, actual: 2 })
        ));
        assert!(NelsonSiegel::fit(&[0.0, 1.0, 2.0], &[0.04, 0.05, 0.06]).is_err());
        assert!(NelsonSiegel::new(0.05, 0.0, 0.0, 0.0).is_err());
    }
}
