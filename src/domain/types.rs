//! Shared domain types.
//!
//! These types are intentionally kept lightweight; the ones that end up in
//! exports are serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for inspection or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::models::{LinearModel, PolyFit};

/// One `(x, y)` observation from the polynomial dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Per-column mean and population standard deviation from the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// A price CSV after target engineering.
///
/// Row `i` holds the features of trading day `dates[i]` and, as target, the
/// close of day `i + 1`. The last day of the file has no next-day close and is
/// not part of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub dates: Vec<NaiveDate>,
    /// Every CSV column except `Date`, in header order.
    pub feature_names: Vec<String>,
    pub features: DMatrix<f64>,
    pub target: DVector<f64>,
}

impl PriceTable {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Result of training and scoring one regularization strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub lambda: f64,
    /// MSE on the held-out test partition.
    pub mse: f64,
    pub model: LinearModel,
}

/// Resolved configuration for `regfit poly`.
#[derive(Debug, Clone)]
pub struct PolyConfig {
    pub data_path: PathBuf,
    pub degrees: Vec<usize>,
    pub eval_at: Option<f64>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_path: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Resolved configuration for `regfit ridge`.
#[derive(Debug, Clone)]
pub struct RidgeConfig {
    pub train_path: PathBuf,
    pub deploy_path: PathBuf,
    /// Fraction of rows (taken from the end) held out for λ selection.
    pub test_fraction: f64,
    pub lambda_min: f64,
    pub lambda_max: f64,
    pub lambda_steps: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_dir: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
    pub export_predictions: Option<PathBuf>,
}

/// Resolved configuration for `regfit apply`.
#[derive(Debug, Clone)]
pub struct ApplyConfig {
    /// Model JSON written by `regfit ridge --export-model`.
    pub model_path: PathBuf,
    pub data_path: PathBuf,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_dir: Option<PathBuf>,
    pub export_predictions: Option<PathBuf>,
}

/// JSON schema for exported polynomial fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyFitsFile {
    pub tool: String,
    pub data_path: String,
    pub n_samples: usize,
    pub fits: Vec<PolyFit>,
}

/// `(λ, MSE)` pair as stored in the model export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub lambda: f64,
    pub mse: f64,
}

/// JSON schema for an exported ridge model.
///
/// Carries the normalization statistics because the weights are meaningless
/// without the exact transform they were trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeModelFile {
    pub tool: String,
    pub train_path: String,
    pub feature_names: Vec<String>,
    pub lambda: f64,
    pub test_mse: f64,
    pub model: LinearModel,
    pub normalization: NormStats,
    pub sweep: Vec<SweepEntry>,
}
