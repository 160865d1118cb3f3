//! Regularization grid generation.
//!
//! λ is selected by a deterministic sweep over a log-spaced grid: ridge
//! behaviour changes on a multiplicative scale, so equal steps in `log10(λ)`
//! cover the interesting range evenly.

use crate::error::AppError;

/// Default grid: `10^-2 ..= 10^3`.
pub const LAMBDA_MIN: f64 = 1e-2;
pub const LAMBDA_MAX: f64 = 1e3;
pub const LAMBDA_STEPS: usize = 51;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
///
/// Points are `10^(log10(min) + i·Δ)`, so decades land on exact powers of ten
/// whenever the endpoints do.
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::input(format!(
            "Invalid lambda range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::input("Lambda steps must be >= 2."));
    }

    let lo = min.log10();
    let hi = max.log10();
    let step = (hi - lo) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(10f64.powf(lo + step * i as f64));
    }
    Ok(out)
}

/// The default 51-point grid from `0.01` to `1000`.
pub fn lambda_range() -> Vec<f64> {
    // Constant, valid bounds: this cannot fail.
    log_space(LAMBDA_MIN, LAMBDA_MAX, LAMBDA_STEPS).unwrap_or_default()
}
