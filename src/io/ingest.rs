//! Input parsing.
//!
//! Two formats are supported:
//!
//! - whitespace-delimited `x y` text files for the polynomial pipeline
//! - price CSVs (`Date`, `Close`, plus any numeric columns) for the ridge
//!   pipeline
//!
//! Design goals:
//! - **Fail fast**: the first malformed row aborts the load with its 1-based
//!   line number (exit code 2)
//! - **Deterministic behavior** (no hidden reordering or imputation)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use nalgebra::{DMatrix, DVector};
use tracing::{info, warn};

use crate::domain::{PriceTable, Sample};
use crate::error::AppError;

const DATE_COLUMN: &str = "date";
const CLOSE_COLUMN: &str = "close";

/// Load `(x, y)` samples from a whitespace-delimited text file.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::input(format!("Failed to read '{}': {e}", path.display())))?;
    let samples = parse_samples(&text, &path.display().to_string())?;
    info!(path = %path.display(), n = samples.len(), "loaded samples");
    Ok(samples)
}

/// Parse `x y` pairs, one per line. Blank lines are skipped.
pub fn parse_samples(text: &str, source: &str) -> Result<Vec<Sample>, AppError> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 2 {
            return Err(AppError::input(format!(
                "{source}:{line_no}: expected 2 columns, found {}: '{}'",
                fields.len(),
                line.trim()
            )));
        }
        let x = parse_number(fields[0]).map_err(|e| AppError::input(format!("{source}:{line_no}: {e}")))?;
        let y = parse_number(fields[1]).map_err(|e| AppError::input(format!("{source}:{line_no}: {e}")))?;
        out.push(Sample { x, y });
    }
    Ok(out)
}

/// Load a price CSV and engineer the next-day close target.
pub fn load_price_table(path: &Path) -> Result<PriceTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let table = parse_price_table(file, &path.display().to_string())?;
    info!(
        path = %path.display(),
        rows = table.len(),
        features = table.feature_names.len(),
        "loaded price table"
    );
    Ok(table)
}

/// Parse a price CSV from any reader.
///
/// Every column except `Date` becomes a feature (in header order, `Close`
/// included). The target of row `i` is the close of row `i + 1`; the final
/// row has no target and is dropped.
pub fn parse_price_table<R: Read>(reader: R, source: &str) -> Result<PriceTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("{source}: failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get(DATE_COLUMN)
        .ok_or_else(|| AppError::input(format!("{source}: missing required column `Date`")))?;
    let close_idx = *header_map
        .get(CLOSE_COLUMN)
        .ok_or_else(|| AppError::input(format!("{source}: missing required column `Close`")))?;

    let feature_cols: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();
    let feature_names: Vec<String> = feature_cols
        .iter()
        .map(|&i| clean_header_name(&headers[i]).to_string())
        .collect();
    let close_pos = feature_cols
        .iter()
        .position(|&c| c == close_idx)
        .ok_or_else(|| AppError::input(format!("{source}: `Close` cannot also be the `Date` column")))?;

    let mut dates = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(line);
            AppError::input(format!("{source}:{line}: CSV parse error: {e}"))
        })?;

        let date = parse_date(record.get(date_idx).unwrap_or(""))
            .map_err(|e| AppError::input(format!("{source}:{line}: {e}")))?;

        let mut row = Vec::with_capacity(feature_cols.len());
        for (&col, name) in feature_cols.iter().zip(&feature_names) {
            let v = parse_number(record.get(col).unwrap_or(""))
                .map_err(|e| AppError::input(format!("{source}:{line}: column `{name}`: {e}")))?;
            row.push(v);
        }
        dates.push(date);
        rows.push(row);
    }

    if rows.len() < 2 {
        return Err(AppError::insufficient_data(format!(
            "{source}: need at least 2 rows to build a next-day target, found {}.",
            rows.len()
        )));
    }
    if dates.windows(2).any(|w| w[1] <= w[0]) {
        warn!(source, "dates are not strictly increasing; rows are used in file order");
    }

    // Drop the last day: it has no next-day close.
    let n = rows.len() - 1;
    let p = feature_names.len();
    let features = DMatrix::from_fn(n, p, |i, j| rows[i][j]);
    let target = DVector::from_iterator(n, rows[1..].iter().map(|r| r[close_pos]));
    dates.truncate(n);

    Ok(PriceTable {
        dates,
        feature_names,
        features,
        target,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (clean_header_name(name).to_ascii_lowercase(), idx))
        .collect()
}

fn clean_header_name(name: &str) -> &str {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, `Date` is reported missing.
    name.trim().trim_start_matches('\u{feff}')
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    let s = s.trim();
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, DD-MM-YYYY."
    ))
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{s}'"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite number '{s}'"))
    }
}
