//! Polynomial basis.
//!
//! A degree-`d` polynomial is represented by its coefficients in descending
//! power order:
//!
//! ```text
//! p(x) = c[0] x^d + c[1] x^(d-1) + ... + c[d]
//! ```
//!
//! The design matrix uses the same column order, so the least-squares
//! solution maps one-to-one onto the coefficient vector.

use nalgebra::DMatrix;

/// Build the feature matrix for a degree-`degree` polynomial.
///
/// Row `i` is `[x_i^d, x_i^(d-1), ..., x_i, 1]`, so the matrix has
/// `x.len()` rows and `degree + 1` columns.
pub fn feature_matrix(x: &[f64], degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    let mut out = DMatrix::<f64>::zeros(x.len(), cols);
    for (i, &xi) in x.iter().enumerate() {
        // Fill right-to-left so each power is one multiply away from the last.
        let mut power = 1.0;
        for j in (0..cols).rev() {
            out[(i, j)] = power;
            power *= xi;
        }
    }
    out
}

/// Evaluate a descending-order polynomial at `x` (Horner's scheme).
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}
