//! Small descriptive statistics helpers.

use nalgebra::DVector;

use crate::error::AppError;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Mean of squared differences between `actual` and `predicted`.
pub fn mean_squared_error(actual: &DVector<f64>, predicted: &DVector<f64>) -> Result<f64, AppError> {
    if actual.len() != predicted.len() {
        return Err(AppError::input(format!(
            "Cannot compute MSE: {} actual values vs {} predictions.",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(AppError::insufficient_data("Cannot compute MSE of an empty set."));
    }
    let sse: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    Ok(sse / actual.len() as f64)
}
