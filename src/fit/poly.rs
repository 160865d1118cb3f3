//! Polynomial least-squares fits over a list of degrees.

use nalgebra::DVector;
use rayon::prelude::*;
use tracing::debug;

use crate::domain::Sample;
use crate::error::AppError;
use crate::math::{feature_matrix, solve_least_squares};
use crate::models::PolyFit;

/// Fit one polynomial of the given degree.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<PolyFit, AppError> {
    if x.len() != y.len() {
        return Err(AppError::input(format!(
            "Got {} x-values but {} y-values.",
            x.len(),
            y.len()
        )));
    }
    let design = feature_matrix(x, degree);
    let target = DVector::from_row_slice(y);
    let beta = solve_least_squares(&design, &target)
        .map_err(|e| AppError::new(e.exit_code(), format!("Degree {degree} fit failed: {e}")))?;

    debug!(degree, coefficients = ?beta.as_slice(), "fitted polynomial");
    Ok(PolyFit {
        degree,
        coefficients: beta.iter().copied().collect(),
    })
}

/// Fit every requested degree.
///
/// The result has one entry per element of `degrees`, in the same order;
/// duplicates are fitted again rather than merged.
pub fn fit_degrees(samples: &[Sample], degrees: &[usize]) -> Result<Vec<PolyFit>, AppError> {
    if samples.is_empty() {
        return Err(AppError::insufficient_data("No samples to fit."));
    }
    let x: Vec<f64> = samples.iter().map(|s| s.x).collect();
    let y: Vec<f64> = samples.iter().map(|s| s.y).collect();

    // Each degree is independent; `collect` keeps the input order and fails
    // the whole run if any degree fails.
    degrees
        .par_iter()
        .map(|&d| fit_polynomial(&x, &y, d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().map(|&(x, y)| Sample { x, y }).collect()
    }

    #[test]
    fn linear_data_recovers_slope_and_intercept() {
        let data = samples(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0), (5.0, 11.0)]);
        let fits = fit_degrees(&data, &[1]).unwrap();
        assert_eq!(fits.len(), 1);
        let c = &fits[0].coefficients;
        assert!((c[0] - 2.0).abs() < 1e-6);
        assert!((c[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fits_follow_requested_order() {
        let data: Vec<Sample> = (0..12)
            .map(|i| {
                let x = i as f64 * 0.5 - 3.0;
                Sample {
                    x,
                    y: 0.5 * x * x * x - x + 2.0,
                }
            })
            .collect();
        let fits = fit_degrees(&data, &[3, 1, 3]).unwrap();
        let degrees: Vec<usize> = fits.iter().map(|f| f.degree).collect();
        assert_eq!(degrees, vec![3, 1, 3]);
        assert_eq!(fits[0].coefficients.len(), 4);
        assert_eq!(fits[1].coefficients.len(), 2);

        // The cubic is recovered exactly.
        let expected = [0.5, 0.0, -1.0, 2.0];
        for (c, e) in fits[0].coefficients.iter().zip(expected) {
            assert!((c - e).abs() < 1e-8, "{c} vs {e}");
        }
        assert_eq!(fits[0], fits[2]);
    }

    #[test]
    fn too_few_samples_for_degree_is_numerical_error() {
        let data = samples(&[(1.0, 1.0), (2.0, 4.0)]);
        let err = fit_degrees(&data, &[1, 3]).unwrap_err();
        assert_eq!(err.exit_code(), AppError::NUMERICAL);
        assert!(err.message().contains("Degree 3"));
    }

    #[test]
    fn repeated_x_values_are_rank_deficient() {
        let data = samples(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]);
        let err = fit_degrees(&data, &[1]).unwrap_err();
        assert_eq!(err.exit_code(), AppError::NUMERICAL);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = fit_degrees(&[], &[1]).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INSUFFICIENT_DATA);
    }
}
