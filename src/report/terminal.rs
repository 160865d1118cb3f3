//! Text summaries and ASCII charts written to any `Write` sink (stdout in the CLI).

use std::io::Write;

use crate::app::pipeline::{ApplyRun, PolyRun, RidgeRun};
use crate::error::AppError;
use crate::plot::ascii::{render_deployment_plot, render_mse_plot, render_poly_plot};
use crate::report::Reporter;
use crate::report::format::{format_apply_summary, format_poly_summary, format_ridge_summary};

/// Character-grid size for terminal plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    pub width: usize,
    pub height: usize,
}

pub struct TerminalReporter<W: Write> {
    out: W,
    eval_at: Option<f64>,
    plot: Option<PlotSize>,
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            eval_at: None,
            plot: None,
        }
    }

    /// Also print each polynomial evaluated at `x`.
    pub fn with_eval_at(mut self, x: Option<f64>) -> Self {
        self.eval_at = x;
        self
    }

    /// Append ASCII charts of the given size (`None` disables them).
    pub fn with_plot(mut self, plot: Option<PlotSize>) -> Self {
        self.plot = plot;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<(), AppError> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| AppError::input(format!("Failed to write output: {e}")))
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn report_poly(&mut self, run: &PolyRun) -> Result<(), AppError> {
        let mut text = format_poly_summary(run, self.eval_at);
        if let Some(size) = self.plot {
            text.push_str(&render_poly_plot(run, size.width, size.height));
            text.push('\n');
        }
        self.emit(&text)
    }

    fn report_ridge(&mut self, run: &RidgeRun) -> Result<(), AppError> {
        let mut text = format_ridge_summary(run);
        if let Some(size) = self.plot {
            text.push_str(&render_mse_plot(run, size.width, size.height));
            text.push('\n');
            text.push_str(&render_deployment_plot(&run.deployment, size.width, size.height));
            text.push('\n');
        }
        self.emit(&text)
    }

    fn report_apply(&mut self, run: &ApplyRun) -> Result<(), AppError> {
        let mut text = format_apply_summary(run);
        if let Some(size) = self.plot {
            text.push_str(&render_deployment_plot(&run.deployment, size.width, size.height));
            text.push('\n');
        }
        self.emit(&text)
    }
}
