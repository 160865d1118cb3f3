//! Regularization sweep and model selection.
//!
//! For each λ of the grid we train a ridge model on the training partition
//! and score it on the held-out partition. The chosen model is the one with
//! the lowest held-out MSE.
//!
//! Tie-break: the scan keeps the *first* minimum in grid order. With an
//! ascending grid this means the smallest λ wins among equal MSEs.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::SweepPoint;
use crate::error::AppError;
use crate::math::train_ridge;
use crate::models::evaluate_mse;

/// Train and score one model per λ.
///
/// The output is in the same order as `lambdas`.
pub fn sweep(
    train_x: &DMatrix<f64>,
    train_y: &DVector<f64>,
    test_x: &DMatrix<f64>,
    test_y: &DVector<f64>,
    lambdas: &[f64],
) -> Result<Vec<SweepPoint>, AppError> {
    if train_x.ncols() != test_x.ncols() {
        return Err(AppError::input(format!(
            "Train has {} features but test has {}.",
            train_x.ncols(),
            test_x.ncols()
        )));
    }

    // Evaluate each λ independently (parallel); `collect` preserves grid order.
    lambdas
        .par_iter()
        .map(|&lambda| -> Result<SweepPoint, AppError> {
            let model = train_ridge(train_x, train_y, lambda)?;
            let mse = evaluate_mse(test_x, test_y, &model)?;
            debug!(lambda, mse, "scored ridge candidate");
            Ok(SweepPoint { lambda, mse, model })
        })
        .collect()
}

/// Index of the minimum-MSE point; the first one wins on ties.
///
/// Non-finite MSEs are never selected.
pub fn select_best_index(points: &[SweepPoint]) -> Result<usize, AppError> {
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        if !p.mse.is_finite() {
            continue;
        }
        match best {
            Some(b) if p.mse >= points[b].mse => {}
            _ => best = Some(i),
        }
    }

    best.ok_or_else(|| {
        if points.is_empty() {
            AppError::numerical("Regularization sweep is empty; nothing to select.")
        } else {
            AppError::numerical("Every candidate in the regularization sweep has a non-finite MSE.")
        }
    })
}

/// The minimum-MSE point (first minimum on ties).
pub fn select_best(points: &[SweepPoint]) -> Result<&SweepPoint, AppError> {
    let idx = select_best_index(points)?;
    Ok(&points[idx])
}
