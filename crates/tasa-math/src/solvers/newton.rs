//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, NUMERICAL_DERIVATIVE_STEP};

/// Derivatives smaller than this stop the iteration.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops when
/// either `|f(x)|` or the last step falls below `config.tolerance`.
///
/// # Example
///
/// ```rust
/// use tasa_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(f: F, df: DF, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    try_newton_raphson(|x| Ok::<_, MathError>((f(x), df(x))), initial_guess, config)
}

/// Newton-Raphson with a central-difference derivative.
///
/// The objective is called three times per iteration, so it may be stateful
/// (`FnMut`), e.g. when it bumps and restores a curve.
pub fn newton_raphson_numerical<F>(mut f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: FnMut(f64) -> f64,
{
    try_newton_raphson_numerical(|x| Ok::<_, MathError>(f(x)), initial_guess, config)
}

/// Newton-Raphson over a fallible objective returning `(f(x), f'(x))`.
///
/// Errors from the objective are returned as-is; solver failures are
/// converted with `From<MathError>`.
pub fn try_newton_raphson<F, E>(mut f: F, initial_guess: f64, config: &SolverConfig) -> Result<SolverResult, E>
where
    F: FnMut(f64) -> Result<(f64, f64), E>,
    E: From<MathError>,
{
    let mut x = initial_guess;
    let mut last_residual = f64::NAN;

    for iteration in 0..config.max_iterations {
        let (fx, dfx) = f(x)?;
        check_finite(x, fx)?;
        last_residual = fx;

        if fx.abs() < config.tolerance {
            log::debug!("newton converged in {iteration} iterations: root={x}, residual={fx:.2e}");
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        check_finite(x, dfx)?;
        if dfx.abs() < MIN_DERIVATIVE {
            log::warn!("newton stalled at x={x}: derivative {dfx:.2e}");
            return Err(MathError::DivisionByZero { value: dfx }.into());
        }

        let step = fx / dfx;
        x -= step;

        if step.abs() < config.tolerance {
            let (final_fx, _) = f(x)?;
            log::debug!(
                "newton converged in {} iterations: root={x}, residual={final_fx:.2e}",
                iteration + 1
            );
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: final_fx,
            });
        }
    }

    log::warn!(
        "newton failed after {} iterations: x={x}, residual={last_residual:.2e}",
        config.max_iterations
    );
    Err(MathError::convergence_failed(config.max_iterations, last_residual.abs()).into())
}

/// Newton-Raphson over a fallible objective with a central-difference
/// derivative.
pub fn try_newton_raphson_numerical<F, E>(mut f: F, initial_guess: f64, config: &SolverConfig) -> Result<SolverResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let h = NUMERICAL_DERIVATIVE_STEP;
    try_newton_raphson(
        |x| {
            let fx = f(x)?;
            let up = f(x + h)?;
            let down = f(x - h)?;
            Ok((fx, (up - down) / (2.0 * h)))
        },
        initial_guess,
        config,
    )
}

fn check_finite(x: f64, value: f64) -> MathResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MathError::NonFinite { x, value })
    }
}
