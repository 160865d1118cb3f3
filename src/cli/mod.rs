//! Command-line parsing for `regfit`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code: `app` turns these structs into plain config structs before
//! any pipeline runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fit::{LAMBDA_MAX, LAMBDA_MIN, LAMBDA_STEPS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "regfit", version, about = "Polynomial least squares and ridge regression with λ selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit least-squares polynomials of several degrees to an `x y` text file.
    Poly(PolyArgs),
    /// Select a ridge λ on one price CSV and apply the model to another.
    Ridge(RidgeArgs),
    /// Apply a model exported by `regfit ridge --export-model` to a price CSV.
    Apply(ApplyArgs),
}

/// Options for polynomial fitting.
#[derive(Debug, Parser, Clone)]
pub struct PolyArgs {
    /// Whitespace-separated `x y` pairs, one per line.
    #[arg(long, value_name = "FILE", default_value = "poly.txt")]
    pub data: PathBuf,

    /// Comma-separated polynomial degrees to fit.
    #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2, 3, 4, 5])]
    pub degrees: Vec<usize>,

    /// Also print every fitted polynomial evaluated at this x.
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub eval_at: Option<f64>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write an SVG chart of the data and fitted curves.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Export the fitted coefficients to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for ridge cross-validation.
#[derive(Debug, Parser, Clone)]
pub struct RidgeArgs {
    /// Price CSV used for training and λ selection.
    #[arg(long, value_name = "CSV", default_value = "AAPL.csv")]
    pub train: PathBuf,

    /// Price CSV the selected model is applied to.
    #[arg(long, value_name = "CSV", default_value = "GOOG.csv")]
    pub deploy: PathBuf,

    /// Fraction of the training rows (latest first) held out for λ selection.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Smallest λ of the log-spaced grid.
    #[arg(long, default_value_t = LAMBDA_MIN)]
    pub lambda_min: f64,

    /// Largest λ of the log-spaced grid.
    #[arg(long, default_value_t = LAMBDA_MAX)]
    pub lambda_max: f64,

    /// Number of grid points.
    #[arg(long, default_value_t = LAMBDA_STEPS)]
    pub lambda_steps: usize,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Directory for the SVG charts (MSE vs λ, actual vs predicted).
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Export the selected model, normalization statistics and sweep to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_model: Option<PathBuf>,

    /// Export deployment predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_predictions: Option<PathBuf>,
}

/// Options for applying a stored model.
#[derive(Debug, Parser, Clone)]
pub struct ApplyArgs {
    /// Model JSON produced by `regfit ridge --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Price CSV to predict.
    #[arg(long, value_name = "CSV")]
    pub data: PathBuf,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Directory for the actual vs predicted SVG chart.
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Export predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_predictions: Option<PathBuf>,
}
