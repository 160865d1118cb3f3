//! Shared pipeline logic used by the CLI front-end and by tests.
//!
//! Each pipeline is a pure function from a config struct to a run-output
//! struct:
//!
//! - polynomial: load samples -> fit each degree
//! - ridge: load prices -> split -> normalize -> λ sweep -> select ->
//!   apply to the deployment dataset
//! - apply: reload an exported ridge model -> apply it to a price file
//!
//! Printing, plotting and exporting happen afterwards in `report`, driven by
//! these outputs.

use chrono::NaiveDate;
use nalgebra::DVector;
use tracing::info;

use crate::domain::{
    ApplyConfig, NormStats, PolyConfig, PriceTable, RidgeConfig, RidgeModelFile, Sample, SweepPoint,
};
use crate::error::AppError;
use crate::fit::{fit_degrees, log_space, select_best_index, sweep, train_test_split};
use crate::io::{load_price_table, read_model_json, read_samples};
use crate::math::{mean_squared_error, normalize_test, normalize_train};
use crate::models::{LinearModel, PolyFit};

/// All computed outputs of a single `regfit poly` run.
#[derive(Debug, Clone)]
pub struct PolyRun {
    pub samples: Vec<Sample>,
    /// One fit per requested degree, in request order.
    pub fits: Vec<PolyFit>,
}

/// Out-of-sample predictions on the deployment dataset.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub dates: Vec<NaiveDate>,
    pub actual: DVector<f64>,
    pub predicted: DVector<f64>,
    pub mse: f64,
}

/// All computed outputs of a single `regfit ridge` run.
#[derive(Debug, Clone)]
pub struct RidgeRun {
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    /// Training-partition statistics, reused for test and deployment data.
    pub stats: NormStats,
    /// One entry per λ, in ascending grid order.
    pub sweep: Vec<SweepPoint>,
    pub best_index: usize,
    pub deployment: Deployment,
}

impl RidgeRun {
    pub fn best(&self) -> &SweepPoint {
        &self.sweep[self.best_index]
    }

    pub fn best_model(&self) -> &LinearModel {
        &self.best().model
    }
}

/// Execute the polynomial pipeline.
pub fn run_polyfit(config: &PolyConfig) -> Result<PolyRun, AppError> {
    if config.degrees.is_empty() {
        return Err(AppError::input("At least one degree is required."));
    }

    let samples = read_samples(&config.data_path)?;
    let fits = fit_degrees(&samples, &config.degrees)?;
    info!(n_samples = samples.len(), n_fits = fits.len(), "polynomial fits complete");

    Ok(PolyRun { samples, fits })
}

/// Execute the ridge pipeline.
pub fn run_ridge(config: &RidgeConfig) -> Result<RidgeRun, AppError> {
    // 1) Load the training source and split it in time order.
    let table = load_price_table(&config.train_path)?;
    let (train, test) = train_test_split(&table, config.test_fraction)?;
    info!(n_train = train.len(), n_test = test.len(), "split training source");

    // 2) Standardize with training statistics only.
    let (train_x, stats) = normalize_train(&train.x)?;
    let test_x = normalize_test(&test.x, &stats)?;

    // 3) Sweep λ and keep the first minimum-MSE model.
    let lambdas = log_space(config.lambda_min, config.lambda_max, config.lambda_steps)?;
    let points = sweep(&train_x, &train.y, &test_x, &test.y, &lambdas)?;
    let best_index = select_best_index(&points)?;
    info!(
        lambda = points[best_index].lambda,
        mse = points[best_index].mse,
        "selected regularization strength"
    );

    // 4) Apply the chosen model to the deployment source.
    let deploy = load_price_table(&config.deploy_path)?;
    let deployment = apply_model(deploy, &table.feature_names, &stats, &points[best_index].model)?;
    info!(rows = deployment.actual.len(), mse = deployment.mse, "applied best model to deployment source");

    Ok(RidgeRun {
        feature_names: table.feature_names,
        n_train: train.len(),
        n_test: test.len(),
        stats,
        sweep: points,
        best_index,
        deployment,
    })
}

/// Outputs of `regfit apply`.
#[derive(Debug, Clone)]
pub struct ApplyRun {
    pub model: RidgeModelFile,
    pub deployment: Deployment,
}

/// Execute the apply pipeline: a previously exported model on a new price file.
pub fn run_apply(config: &ApplyConfig) -> Result<ApplyRun, AppError> {
    let model = read_model_json(&config.model_path)?;
    let table = load_price_table(&config.data_path)?;
    let deployment = apply_model(table, &model.feature_names, &model.normalization, &model.model)?;
    info!(rows = deployment.actual.len(), mse = deployment.mse, "applied stored model");

    Ok(ApplyRun { model, deployment })
}

/// Standardize `table` with the training statistics and score `model` on it.
///
/// Columns must match the training columns by name (ASCII case-insensitive,
/// like the `Date`/`Close` lookup) and order.
fn apply_model(
    table: PriceTable,
    feature_names: &[String],
    stats: &NormStats,
    model: &LinearModel,
) -> Result<Deployment, AppError> {
    if !same_columns(&table.feature_names, feature_names) {
        return Err(AppError::input(format!(
            "Deployment columns {:?} do not match training columns {:?}.",
            table.feature_names, feature_names
        )));
    }
    let x = normalize_test(&table.features, stats)?;
    let predicted = model.predict(&x)?;
    if let Some(i) = predicted.iter().position(|v| !v.is_finite()) {
        return Err(AppError::numerical(format!(
            "Non-finite prediction for {} (row {}).",
            table.dates[i],
            i + 1
        )));
    }
    let mse = mean_squared_error(&table.target, &predicted)?;

    Ok(Deployment {
        dates: table.dates,
        actual: table.target,
        predicted,
        mse,
    })
}

fn same_columns(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use crate::fit::{LAMBDA_MAX, LAMBDA_MIN, LAMBDA_STEPS};
    use crate::report::{ExportReporter, Reporter};

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn poly_config(data_path: PathBuf, degrees: Vec<usize>) -> PolyConfig {
        PolyConfig {
            data_path,
            degrees,
            eval_at: None,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            svg_path: None,
            export_json: None,
        }
    }

    /// A synthetic price series: a drifting sine wave with OHLC/volume derived from it.
    fn price_csv(days: usize, phase: f64) -> String {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mut out = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
        for i in 0..days {
            let t = i as f64;
            let close = 100.0 + 0.2 * t + 5.0 * (0.3 * t + phase).sin();
            let open = close - 0.5 * (0.7 * t).cos();
            let high = close.max(open) + 1.0 + 0.1 * (t % 3.0);
            let low = close.min(open) - 1.0 - 0.1 * (t % 5.0);
            let adj = close * 0.99 - 0.3 * (0.05 * t).sin();
            let volume = 1_000_000.0 + 50_000.0 * (0.11 * t).sin();
            let date = start + chrono::Days::new(i as u64);
            out.push_str(&format!(
                "{date},{open:.4},{high:.4},{low:.4},{close:.4},{adj:.4},{volume:.0}\n"
            ));
        }
        out
    }

    fn ridge_config(train_path: PathBuf, deploy_path: PathBuf) -> RidgeConfig {
        RidgeConfig {
            train_path,
            deploy_path,
            test_fraction: 0.2,
            lambda_min: LAMBDA_MIN,
            lambda_max: LAMBDA_MAX,
            lambda_steps: LAMBDA_STEPS,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            svg_dir: None,
            export_model: None,
            export_predictions: None,
        }
    }

    fn apply_config(model_path: PathBuf, data_path: PathBuf) -> ApplyConfig {
        ApplyConfig {
            model_path,
            data_path,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            svg_dir: None,
            export_predictions: None,
        }
    }

    #[test]
    fn polyfit_end_to_end_recovers_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "poly.txt", "1 3\n2 5\n3 7\n4 9\n5 11");
        let run = run_polyfit(&poly_config(path, vec![1])).unwrap();
        assert_eq!(run.samples.len(), 5);
        let c = &run.fits[0].coefficients;
        assert!((c[0] - 2.0).abs() < 1e-6);
        assert!((c[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn polyfit_reports_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "poly.txt", "1 3\n2\n3 7\n");
        let err = run_polyfit(&poly_config(path, vec![1])).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains(":2:"), "{err}");
    }

    #[test]
    fn polyfit_requires_degrees() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "poly.txt", "1 3\n");
        let err = run_polyfit(&poly_config(path, vec![])).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
    }

    #[test]
    fn ridge_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(120, 0.0));
        let deploy = write_file(dir.path(), "GOOG.csv", &price_csv(60, 1.3));
        let run = run_ridge(&ridge_config(train, deploy)).unwrap();

        // 119 engineered rows -> ceil(23.8) = 24 held out.
        assert_eq!(run.n_test, 24);
        assert_eq!(run.n_train, 95);
        assert_eq!(run.feature_names.len(), 6);
        assert_eq!(run.sweep.len(), 51);

        let min = run.sweep.iter().map(|p| p.mse).fold(f64::INFINITY, f64::min);
        assert_eq!(run.best().mse, min);
        assert!(run.sweep[..run.best_index].iter().all(|p| p.mse > min));

        assert_eq!(run.deployment.actual.len(), 59);
        assert_eq!(run.deployment.predicted.len(), 59);
        assert_eq!(run.deployment.dates.len(), 59);
        assert!(run.deployment.mse.is_finite());
    }

    #[test]
    fn deployment_uses_training_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(80, 0.0));
        let deploy = write_file(dir.path(), "GOOG.csv", &price_csv(40, 2.0));
        let run = run_ridge(&ridge_config(train, deploy.clone())).unwrap();

        // Re-derive the predictions by hand with the stored training statistics.
        let table = load_price_table(&deploy).unwrap();
        let x = normalize_test(&table.features, &run.stats).unwrap();
        let expected = run.best_model().predict(&x).unwrap();
        assert!((expected - &run.deployment.predicted).amax() < 1e-9);

        // Statistics recomputed on the deployment data would differ.
        let (_, own_stats) = normalize_train(&table.features).unwrap();
        assert_ne!(own_stats, run.stats);
    }

    #[test]
    fn apply_reproduces_ridge_deployment_from_exported_model() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(80, 0.0));
        let deploy = write_file(dir.path(), "GOOG.csv", &price_csv(40, 0.7));
        let mut config = ridge_config(train, deploy.clone());
        let model_path = dir.path().join("model.json");
        config.export_model = Some(model_path.clone());
        let run = run_ridge(&config).unwrap();

        let mut exports = ExportReporter::for_ridge(&config);
        exports.report_ridge(&run).unwrap();

        let applied = run_apply(&apply_config(model_path, deploy)).unwrap();
        assert!((applied.model.lambda - run.best().lambda).abs() < 1e-12);
        assert_eq!(applied.deployment.dates, run.deployment.dates);
        assert!((applied.deployment.predicted - &run.deployment.predicted).amax() < 1e-9);
        assert!((applied.deployment.mse - run.deployment.mse).abs() < 1e-9);
    }

    #[test]
    fn ridge_rejects_mismatched_deployment_columns() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(40, 0.0));
        let deploy = write_file(
            dir.path(),
            "GOOG.csv",
            "Date,Open,Close\n2024-01-02,1,2\n2024-01-03,2,3\n2024-01-04,3,4\n",
        );
        let err = run_ridge(&ridge_config(train, deploy)).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INPUT);
        assert!(err.message().contains("do not match"));
    }

    #[test]
    fn deployment_header_case_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(60, 0.0));
        let upper = price_csv(30, 0.4);
        let lower = upper.replacen(
            "Date,Open,High,Low,Close,Adj Close,Volume",
            "date,open,high,low,close,adj close,volume",
            1,
        );
        assert_ne!(upper, lower);
        let deploy = write_file(dir.path(), "GOOG.csv", &lower);

        let run = run_ridge(&ridge_config(train, deploy)).unwrap();
        assert_eq!(run.deployment.actual.len(), 29);
        assert!(run.deployment.mse.is_finite());
    }

    #[test]
    fn apply_rejects_zero_std_in_stored_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_file(
            dir.path(),
            "model.json",
            r#"{
  "tool": "regfit",
  "train_path": "AAPL.csv",
  "feature_names": ["Open", "Close"],
  "lambda": 1.0,
  "test_mse": 1.0,
  "model": { "coefficients": [0.5, 0.5], "intercept": 1.0 },
  "normalization": { "mean": [2.0, 3.0], "std": [0.0, 1.0] },
  "sweep": []
}"#,
        );
        let data = write_file(
            dir.path(),
            "GOOG.csv",
            "Date,Open,Close\n2024-01-02,1,2\n2024-01-03,2,3\n2024-01-04,3,4\n",
        );

        let err = run_apply(&apply_config(model, data)).unwrap_err();
        assert_eq!(err.exit_code(), AppError::NUMERICAL);
        assert!(err.message().contains("`Open`"), "{err}");
    }

    #[test]
    fn apply_exports_predictions_through_reporter() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_file(dir.path(), "AAPL.csv", &price_csv(60, 0.0));
        let deploy = write_file(dir.path(), "GOOG.csv", &price_csv(25, 0.9));
        let mut config = ridge_config(train, deploy.clone());
        let model_path = dir.path().join("model.json");
        config.export_model = Some(model_path.clone());
        let run = run_ridge(&config).unwrap();
        ExportReporter::for_ridge(&config).report_ridge(&run).unwrap();

        let pred_path = dir.path().join("applied.csv");
        let mut apply = apply_config(model_path, deploy);
        apply.export_predictions = Some(pred_path.clone());
        let applied = run_apply(&apply).unwrap();
        ExportReporter::for_apply(&apply).report_apply(&applied).unwrap();

        let csv = std::fs::read_to_string(&pred_path).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[0], "date,actual,predicted,residual");
        assert_eq!(rows.len(), applied.deployment.actual.len() + 1);
        let first = applied.deployment.dates[0].format("%Y-%m-%d").to_string();
        assert!(rows[1].starts_with(&first), "{}", rows[1]);
    }
}
