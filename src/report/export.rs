//! File exports: JSON model files and the deployment predictions CSV.

use std::path::PathBuf;

use tracing::info;

use crate::app::pipeline::{ApplyRun, Deployment, PolyRun, RidgeRun};
use crate::domain::{ApplyConfig, PolyConfig, PolyFitsFile, RidgeConfig, RidgeModelFile, SweepEntry};
use crate::error::AppError;
use crate::io::{write_model_json, write_poly_json, write_predictions_csv};
use crate::report::Reporter;

const TOOL: &str = "regfit";

/// Writes whichever exports were requested; absent paths are skipped.
#[derive(Debug, Clone, Default)]
pub struct ExportReporter {
    /// Input file recorded in the JSON for provenance.
    source: String,
    json: Option<PathBuf>,
    predictions: Option<PathBuf>,
}

impl ExportReporter {
    pub fn for_poly(config: &PolyConfig) -> Self {
        Self {
            source: config.data_path.display().to_string(),
            json: config.export_json.clone(),
            predictions: None,
        }
    }

    pub fn for_ridge(config: &RidgeConfig) -> Self {
        Self {
            source: config.train_path.display().to_string(),
            json: config.export_model.clone(),
            predictions: config.export_predictions.clone(),
        }
    }

    /// Applying a stored model only produces predictions; there is no JSON to write.
    pub fn for_apply(config: &ApplyConfig) -> Self {
        Self {
            source: config.model_path.display().to_string(),
            json: None,
            predictions: config.export_predictions.clone(),
        }
    }

    fn write_predictions(&self, d: &Deployment) -> Result<(), AppError> {
        if let Some(path) = &self.predictions {
            write_predictions_csv(path, &d.dates, &d.actual, &d.predicted)?;
            info!(path = %path.display(), rows = d.actual.len(), "exported predictions");
        }
        Ok(())
    }
}

impl Reporter for ExportReporter {
    fn report_poly(&mut self, run: &PolyRun) -> Result<(), AppError> {
        let Some(path) = &self.json else {
            return Ok(());
        };
        let file = PolyFitsFile {
            tool: TOOL.to_string(),
            data_path: self.source.clone(),
            n_samples: run.samples.len(),
            fits: run.fits.clone(),
        };
        write_poly_json(path, &file)?;
        info!(path = %path.display(), "exported polynomial fits");
        Ok(())
    }

    fn report_ridge(&mut self, run: &RidgeRun) -> Result<(), AppError> {
        if let Some(path) = &self.json {
            let best = run.best();
            let file = RidgeModelFile {
                tool: TOOL.to_string(),
                train_path: self.source.clone(),
                feature_names: run.feature_names.clone(),
                lambda: best.lambda,
                test_mse: best.mse,
                model: best.model.clone(),
                normalization: run.stats.clone(),
                sweep: run
                    .sweep
                    .iter()
                    .map(|p| SweepEntry {
                        lambda: p.lambda,
                        mse: p.mse,
                    })
                    .collect(),
            };
            write_model_json(path, &file)?;
            info!(path = %path.display(), "exported ridge model");
        }

        self.write_predictions(&run.deployment)
    }

    fn report_apply(&mut self, run: &ApplyRun) -> Result<(), AppError> {
        self.write_predictions(&run.deployment)
    }
}
