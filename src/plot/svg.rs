//! Plotters SVG charts.
//!
//! Same three views as the terminal plots, at a resolution suitable for
//! reports: data + fitted curves, test MSE vs λ, deployment actual vs
//! predicted. Bounds and series are computed before any drawing starts.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use super::{sample_fn, span};
use crate::app::pipeline::{ApplyRun, Deployment, PolyRun, RidgeRun};
use crate::error::AppError;
use crate::report::Reporter;

/// Default canvas size in pixels.
pub const SVG_SIZE: (u32, u32) = (900, 600);

/// File names used inside the ridge output directory.
pub const MSE_SVG: &str = "mse_vs_lambda.svg";
pub const DEPLOYMENT_SVG: &str = "deployment.svg";

/// Points per fitted curve.
const CURVE_POINTS: usize = 400;

type DrawResult = Result<(), Box<dyn Error>>;

/// Writes SVG charts.
///
/// For polynomial runs `target` is the output file; for ridge runs it is a
/// directory (created if missing) receiving `MSE_SVG` and `DEPLOYMENT_SVG`.
/// Applying a stored model writes only `DEPLOYMENT_SVG`.
#[derive(Debug, Clone)]
pub struct SvgReporter {
    target: PathBuf,
    size: (u32, u32),
}

impl SvgReporter {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            size: SVG_SIZE,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

impl Reporter for SvgReporter {
    fn report_poly(&mut self, run: &PolyRun) -> Result<(), AppError> {
        draw_poly(&self.target, run, self.size).map_err(|e| svg_error(&self.target, e))?;
        info!(path = %self.target.display(), "wrote polynomial chart");
        Ok(())
    }

    fn report_ridge(&mut self, run: &RidgeRun) -> Result<(), AppError> {
        self.create_dir()?;

        let mse_path = self.target.join(MSE_SVG);
        draw_mse(&mse_path, run, self.size).map_err(|e| svg_error(&mse_path, e))?;

        self.write_deployment(&run.deployment)?;
        info!(dir = %self.target.display(), "wrote ridge charts");
        Ok(())
    }

    fn report_apply(&mut self, run: &ApplyRun) -> Result<(), AppError> {
        self.create_dir()?;
        self.write_deployment(&run.deployment)?;
        info!(dir = %self.target.display(), "wrote deployment chart");
        Ok(())
    }
}

impl SvgReporter {
    fn create_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.target).map_err(|e| {
            AppError::input(format!(
                "Failed to create SVG directory '{}': {e}",
                self.target.display()
            ))
        })
    }

    fn write_deployment(&self, d: &Deployment) -> Result<(), AppError> {
        let path = self.target.join(DEPLOYMENT_SVG);
        draw_deployment(&path, d, self.size).map_err(|e| svg_error(&path, e))
    }
}

fn svg_error(path: &Path, e: Box<dyn Error>) -> AppError {
    AppError::input(format!("Failed to render SVG '{}': {e}", path.display()))
}

fn draw_poly(path: &Path, run: &PolyRun, size: (u32, u32)) -> DrawResult {
    let (x0, x1) = span(run.samples.iter().map(|s| s.x)).unwrap_or((0.0, 1.0));
    let curves: Vec<(usize, Vec<(f64, f64)>)> = run
        .fits
        .iter()
        .map(|fit| (fit.degree, finite(sample_fn(x0, x1, CURVE_POINTS, |x| fit.predict(x)))))
        .collect();
    let ys = run
        .samples
        .iter()
        .map(|s| s.y)
        .chain(curves.iter().flat_map(|(_, c)| c.iter().map(|p| p.1)));
    let (y0, y1) = padded(span(ys).unwrap_or((0.0, 1.0)));

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Polynomial least-squares fits", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    for (i, (degree, curve)) in curves.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(2)))?
            .label(format!("degree {degree}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .draw_series(run.samples.iter().map(|s| Circle::new((s.x, s.y), 3, BLACK.filled())))?
        .label("data")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLACK.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_mse(path: &Path, run: &RidgeRun, size: (u32, u32)) -> DrawResult {
    // Plot against log10(λ); tick labels map back to λ.
    let curve = finite(run.sweep.iter().map(|p| (p.lambda.log10(), p.mse)).collect());
    let (x0, x1) = span(curve.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y0, y1) = padded(span(curve.iter().map(|p| p.1)).unwrap_or((0.0, 1.0)));
    let best = run.best();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Test MSE vs regularization strength", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("lambda (log scale)")
        .y_desc("test MSE")
        .x_label_formatter(&|v| format!("{:.0e}", 10f64.powf(*v)))
        .draw()?;

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), BLUE.stroke_width(2)))?
        .label("test MSE")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(std::iter::once(Circle::new(
            (best.lambda.log10(), best.mse),
            5,
            RED.filled(),
        )))?
        .label(format!("best lambda = {:.4}", best.lambda))
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_deployment(path: &Path, d: &Deployment, size: (u32, u32)) -> DrawResult {
    let actual: Vec<(f64, f64)> = d.actual.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
    let predicted: Vec<(f64, f64)> = d
        .predicted
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64, y))
        .collect();

    let (x0, x1) = span(actual.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let ys = actual.iter().chain(predicted.iter()).map(|p| p.1);
    let (y0, y1) = padded(span(ys).unwrap_or((0.0, 1.0)));

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Next-day close: actual vs predicted (MSE {:.4})", d.mse),
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("date")
        .y_desc("close")
        .x_labels(6)
        .x_label_formatter(&|v| {
            d.dates
                .get(v.round().max(0.0) as usize)
                .map(|date| date.to_string())
                .unwrap_or_default()
        })
        .draw()?;

    chart
        .draw_series(LineSeries::new(actual, BLUE.stroke_width(2)))?
        .label("actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(predicted, RED.stroke_width(2)))?
        .label("predicted")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn finite(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
