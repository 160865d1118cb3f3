//! Ordinary least squares solver.
//!
//! We solve
//!
//! ```text
//! minimize ||X β - y||^2
//! ```
//!
//! through an SVD of `X` rather than the normal equations: forming `XᵀX`
//! squares the condition number, and high-degree polynomial features are
//! badly conditioned to begin with.
//!
//! Rank-deficient systems are rejected instead of being solved in the
//! minimum-norm sense. A singular value counts towards the rank when it
//! exceeds `σ_max · max(n, p) · ε`, the same cut-off LAPACK-based rank
//! estimates use.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Solve a least squares problem using SVD.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let (n, p) = x.shape();
    if n != y.len() {
        return Err(AppError::input(format!(
            "Feature matrix has {n} rows but the target has {} values.",
            y.len()
        )));
    }
    if p == 0 {
        return Err(AppError::input("Feature matrix has no columns."));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::numerical("Least squares input contains non-finite values."));
    }
    if n < p {
        return Err(AppError::numerical(format!(
            "Underdetermined least squares: {n} samples for {p} coefficients."
        )));
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    let tol = sigma_max * n.max(p) as f64 * f64::EPSILON;
    let rank = svd.rank(tol);
    if sigma_max <= 0.0 || rank < p {
        return Err(AppError::numerical(format!(
            "Singular or ill-conditioned feature matrix: rank {rank} < {p} columns."
        )));
    }

    let beta = svd
        .solve(y, tol)
        .map_err(|e| AppError::numerical(format!("Least squares solve failed: {e}")))?;
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numerical("Least squares produced non-finite coefficients."));
    }
    Ok(beta)
}
