//! Model JSON files: polynomial fits (write-only) and ridge models (read/write).
//!
//! Two portable representations are produced:
//! - polynomial fits (`PolyFitsFile`): one coefficient vector per degree
//! - ridge models (`RidgeModelFile`): weights, intercept, chosen λ, the
//!   training normalization statistics and the full λ/MSE sweep
//!
//! The schemas are defined in `domain::types`.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{PolyFitsFile, RidgeModelFile};
use crate::error::AppError;

/// Write polynomial fits as pretty JSON.
pub fn write_poly_json(path: &Path, fits: &PolyFitsFile) -> Result<(), AppError> {
    write_json(path, fits)
}

/// Write a ridge model as pretty JSON.
pub fn write_model_json(path: &Path, model: &RidgeModelFile) -> Result<(), AppError> {
    write_json(path, model)
}

/// Read a ridge model written by `write_model_json`.
///
/// The file is checked for internal consistency before it is returned.
pub fn read_model_json(path: &Path) -> Result<RidgeModelFile, AppError> {
    let model: RidgeModelFile = read_json(path)?;
    validate_model_file(&model)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))?;
    Ok(model)
}

/// Feature names, statistics and weights must agree in length; statistics and
/// weights must be usable numbers.
pub fn validate_model_file(model: &RidgeModelFile) -> Result<(), AppError> {
    let p = model.feature_names.len();
    let lens = [
        model.normalization.mean.len(),
        model.normalization.std.len(),
        model.model.coefficients.len(),
    ];
    if lens.iter().any(|&n| n != p) {
        return Err(AppError::input(format!(
            "Model file is inconsistent: {p} feature names, {} means, {} stds, {} coefficients.",
            lens[0], lens[1], lens[2]
        )));
    }

    let norm = &model.normalization;
    for (j, (&m, &s)) in norm.mean.iter().zip(&norm.std).enumerate() {
        if !m.is_finite() || !(s.is_finite() && s > 0.0) {
            return Err(AppError::numerical(format!(
                "Model file has unusable normalization for `{}` (mean={m}, std={s}).",
                model.feature_names[j]
            )));
        }
    }
    let weights = &model.model;
    if !weights.intercept.is_finite() || weights.coefficients.iter().any(|c| !c.is_finite()) {
        return Err(AppError::numerical("Model file has non-finite weights."));
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::input(format!("Failed to write JSON '{}': {e}", path.display())))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid JSON '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NormStats, SweepEntry};
    use crate::models::{LinearModel, PolyFit};

    #[test]
    fn ridge_model_file_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let file = RidgeModelFile {
            tool: "regfit".to_string(),
            train_path: "AAPL.csv".to_string(),
            feature_names: vec!["Open".to_string(), "Close".to_string()],
            lambda: 0.5,
            test_mse: 1.25,
            model: LinearModel {
                coefficients: vec![0.3, 0.7],
                intercept: 12.0,
            },
            normalization: NormStats {
                mean: vec![10.0, 11.0],
                std: vec![1.0, 2.0],
            },
            sweep: vec![SweepEntry { lambda: 0.5, mse: 1.25 }],
        };
        write_model_json(&path, &file).unwrap();
        assert_eq!(read_model_json(&path).unwrap(), file);
    }

    #[test]
    fn poly_file_is_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fits.json");
        let file = PolyFitsFile {
            tool: "regfit".to_string(),
            data_path: "poly.txt".to_string(),
            n_samples: 5,
            fits: vec![PolyFit {
                degree: 1,
                coefficients: vec![2.0, 1.0],
            }],
        };
        write_poly_json(&path, &file).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw["fits"][0]["degree"], 1);
        assert_eq!(serde_json::from_str::<PolyFitsFile>(&text).unwrap(), file);
    }

    fn model_file() -> RidgeModelFile {
        RidgeModelFile {
            tool: "regfit".to_string(),
            train_path: "AAPL.csv".to_string(),
            feature_names: vec!["Open".to_string(), "Close".to_string()],
            lambda: 1.0,
            test_mse: 1.0,
            model: LinearModel {
                coefficients: vec![0.5, 0.5],
                intercept: 1.0,
            },
            normalization: NormStats {
                mean: vec![10.0, 11.0],
                std: vec![1.0, 2.0],
            },
            sweep: Vec::new(),
        }
    }

    #[test]
    fn zero_std_model_file_is_rejected_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut file = model_file();
        file.normalization.std = vec![0.0, 1.0];
        write_model_json(&path, &file).unwrap();

        let err = read_model_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), AppError::NUMERICAL);
        assert!(err.message().contains("`Open`"), "{err}");
    }

    #[test]
    fn inconsistent_model_file_is_input_error() {
        let mut file = model_file();
        file.model.coefficients.push(1.0);
        let err = validate_model_file(&file).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains("3 coefficients"), "{err}");

        let mut file = model_file();
        file.model.intercept = f64::INFINITY;
        assert_eq!(validate_model_file(&file).unwrap_err().exit_code(), AppError::NUMERICAL);
        assert!(validate_model_file(&model_file()).is_ok());
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = read_model_json(Path::new("/nonexistent/regfit/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
    }
}
