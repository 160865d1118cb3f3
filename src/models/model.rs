//! Fitted models and their evaluation.
//!
//! Two model shapes come out of the pipelines:
//! - `PolyFit`: a polynomial in descending power order (least squares)
//! - `LinearModel`: weights + intercept over standardized features (ridge)

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::math::{horner, mean_squared_error};

/// Least-squares polynomial fit for one degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyFit {
    pub degree: usize,
    /// `degree + 1` coefficients, highest power first.
    pub coefficients: Vec<f64>,
}

impl PolyFit {
    pub fn predict(&self, x: f64) -> f64 {
        horner(&self.coefficients, x)
    }
}

/// Linear predictor `ŷ = wᵀx + b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict one value per row of `x`.
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, AppError> {
        if x.ncols() != self.n_features() {
            return Err(AppError::input(format!(
                "Model expects {} features but the matrix has {} columns.",
                self.n_features(),
                x.ncols()
            )));
        }
        let w = DVector::from_row_slice(&self.coefficients);
        Ok((x * w).add_scalar(self.intercept))
    }

    /// Mean squared error of the model's predictions against `y`.
    pub fn mse(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<f64, AppError> {
        let y_hat = self.predict(x)?;
        mean_squared_error(y, &y_hat)
    }

    /// Human-readable equation, e.g. `y_hat(x) = 0.1000x1 + -0.2500x2 + 3.0000`.
    pub fn equation(&self) -> String {
        let mut terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c:.4}x{}", i + 1))
            .collect();
        terms.push(format!("{:.4}", self.intercept));
        format!("y_hat(x) = {}", terms.join(" + "))
    }
}

/// Convenience: MSE of `model` on `(x, y)`.
pub fn evaluate_mse(x: &DMatrix<f64>, y: &DVector<f64>, model: &LinearModel) -> Result<f64, AppError> {
    model.mse(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_predict_uses_descending_order() {
        let fit = PolyFit {
            degree: 2,
            coefficients: vec![1.0, -3.0, 2.0],
        };
        // x^2 - 3x + 2 at x = 3
        assert!((fit.predict(3.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn linear_model_predicts_and_scores() {
        let model = LinearModel {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 3.0, 0.0]);
        let y_hat = model.predict(&x).unwrap();
        assert!((y_hat[0] - 1.5).abs() < 1e-12);
        assert!((y_hat[1] - 6.5).abs() < 1e-12);

        let y = DVector::from_row_slice(&[1.5, 4.5]);
        assert!((evaluate_mse(&x, &y, &model).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let model = LinearModel {
            coefficients: vec![1.0],
            intercept: 0.0,
        };
        let x = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        assert_eq!(model.predict(&x).unwrap_err().exit_code(), AppError::INPUT);
    }

    #[test]
    fn equation_string_lists_every_term() {
        let model = LinearModel {
            coefficients: vec![0.1, -0.25],
            intercept: 3.0,
        };
        assert_eq!(model.equation(), "y_hat(x) = 0.1000x1 + -0.2500x2 + 3.0000");
    }
}
