//! Feature standardization.
//!
//! Statistics are always computed on the training partition and then frozen:
//! test and deployment data go through `normalize_test` with the *training*
//! mean and standard deviation.

use nalgebra::DMatrix;

use crate::domain::NormStats;
use crate::error::AppError;
use crate::math::stats::{mean, population_std};

/// Standardize each column to zero mean and unit (population) variance.
///
/// Returns the scaled matrix and the statistics used, so the same transform
/// can be replayed on other data.
pub fn normalize_train(x: &DMatrix<f64>) -> Result<(DMatrix<f64>, NormStats), AppError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(AppError::insufficient_data("Cannot normalize an empty feature matrix."));
    }

    let mut means = Vec::with_capacity(x.ncols());
    let mut stds = Vec::with_capacity(x.ncols());
    for (j, col) in x.column_iter().enumerate() {
        let values: Vec<f64> = col.iter().copied().collect();
        // Both are `Some` because the matrix is non-empty.
        let m = mean(&values).unwrap_or(f64::NAN);
        let s = population_std(&values).unwrap_or(f64::NAN);
        if !m.is_finite() || !s.is_finite() {
            return Err(AppError::numerical(format!(
                "Feature column {j} has non-finite statistics."
            )));
        }
        if s == 0.0 {
            return Err(AppError::numerical(format!(
                "Feature column {j} has zero variance in the training data; cannot standardize."
            )));
        }
        means.push(m);
        stds.push(s);
    }

    let stats = NormStats { mean: means, std: stds };
    let scaled = normalize_test(x, &stats)?;
    Ok((scaled, stats))
}

/// Apply previously computed statistics: `(x - mean) / std` per column.
pub fn normalize_test(x: &DMatrix<f64>, stats: &NormStats) -> Result<DMatrix<f64>, AppError> {
    if stats.mean.len() != x.ncols() || stats.std.len() != x.ncols() {
        return Err(AppError::input(format!(
            "Normalization statistics cover {} columns but the matrix has {}.",
            stats.mean.len().min(stats.std.len()),
            x.ncols()
        )));
    }

    for (j, (&m, &s)) in stats.mean.iter().zip(&stats.std).enumerate() {
        if !m.is_finite() || !(s.is_finite() && s > 0.0) {
            return Err(AppError::numerical(format!(
                "Normalization statistics for column {j} are unusable (mean={m}, std={s})."
            )));
        }
    }

    let mut out = x.clone();
    for (j, mut col) in out.column_iter_mut().enumerate() {
        let (m, s) = (stats.mean[j], stats.std[j]);
        for v in col.iter_mut() {
            *v = (*v - m) / s;
        }
    }
    Ok(out)
}
