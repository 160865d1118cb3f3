//! Ridge regression with an unpenalized intercept.
//!
//! ```text
//! minimize ||y - X β - b||^2 + λ ||β||^2
//! ```
//!
//! Centering `X` and `y` removes the intercept from the penalized problem.
//! The remaining system `(XcᵀXc + λI) β = Xcᵀ yc` is symmetric positive
//! definite for `λ > 0`, so a Cholesky factorization solves it directly, and
//! the intercept is recovered as `b = ȳ - x̄ᵀβ`.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::models::LinearModel;

/// Relative pivot tolerance for the Cholesky factor.
const PIVOT_RTOL: f64 = 1e-12;

/// Fit a ridge model with regularization strength `lambda`.
pub fn train_ridge(x: &DMatrix<f64>, y: &DVector<f64>, lambda: f64) -> Result<LinearModel, AppError> {
    let (n, p) = x.shape();
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(AppError::input(format!(
            "Invalid regularization strength {lambda} (must be finite and >= 0)."
        )));
    }
    if n != y.len() {
        return Err(AppError::input(format!(
            "Feature matrix has {n} rows but the target has {} values.",
            y.len()
        )));
    }
    if n == 0 || p == 0 {
        return Err(AppError::insufficient_data("Cannot fit ridge regression on empty data."));
    }

    let x_mean = DVector::from_iterator(p, x.column_iter().map(|c| c.sum() / n as f64));
    let y_mean = y.sum() / n as f64;

    let mut xc = x.clone();
    for (j, mut col) in xc.column_iter_mut().enumerate() {
        col.add_scalar_mut(-x_mean[j]);
    }
    let yc = y.add_scalar(-y_mean);

    let xt = xc.transpose();
    let mut gram = &xt * &xc;
    for i in 0..p {
        gram[(i, i)] += lambda;
    }
    let rhs = &xt * &yc;
    let scale = gram.diagonal().max();

    let chol = gram.cholesky().ok_or_else(|| {
        AppError::numerical(format!(
            "Ridge system is not positive definite at lambda={lambda} (collinear features?)."
        ))
    })?;
    // A pivot that is tiny relative to the largest diagonal entry means the
    // system is singular up to rounding.
    let min_pivot = chol.l_dirty().diagonal().iter().fold(f64::INFINITY, |acc, d| acc.min(d * d));
    if min_pivot <= scale * p as f64 * PIVOT_RTOL {
        return Err(AppError::numerical(format!(
            "Ridge system is numerically singular at lambda={lambda} (collinear features?)."
        )));
    }

    let beta = chol.solve(&rhs);
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numerical(format!(
            "Ridge fit produced non-finite coefficients at lambda={lambda}."
        )));
    }

    let intercept = y_mean - x_mean.dot(&beta);
    Ok(LinearModel {
        coefficients: beta.iter().copied().collect(),
        intercept,
    })
}
