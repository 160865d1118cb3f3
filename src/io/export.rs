//! Export deployment predictions to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use nalgebra::DVector;

use crate::error::AppError;

/// Write `date,actual,predicted,residual` rows.
pub fn write_predictions_csv(
    path: &Path,
    dates: &[NaiveDate],
    actual: &DVector<f64>,
    predicted: &DVector<f64>,
) -> Result<(), AppError> {
    if dates.len() != actual.len() || actual.len() != predicted.len() {
        return Err(AppError::input(format!(
            "Prediction export length mismatch: {} dates, {} actual, {} predicted.",
            dates.len(),
            actual.len(),
            predicted.len()
        )));
    }

    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_predictions(&mut out, dates, actual, predicted)
        .and_then(|()| out.flush())
        .map_err(|e| AppError::input(format!("Failed to write export CSV '{}': {e}", path.display())))
}

fn write_predictions<W: Write>(
    out: &mut W,
    dates: &[NaiveDate],
    actual: &DVector<f64>,
    predicted: &DVector<f64>,
) -> std::io::Result<()> {
    writeln!(out, "date,actual,predicted,residual")?;
    for ((date, a), p) in dates.iter().zip(actual.iter()).zip(predicted.iter()) {
        writeln!(out, "{date},{a:.6},{p:.6},{:.6}", a - p)?;
    }
    Ok(())
}
