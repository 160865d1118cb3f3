//! Reporting: everything that happens after a pipeline has produced its run.
//!
//! Reporters consume finished runs and never feed back into fitting, so the
//! numeric core stays independent of output formats.

pub mod export;
pub mod format;
pub mod terminal;

pub use crate::plot::svg::SvgReporter;
pub use export::ExportReporter;
pub use terminal::TerminalReporter;

use crate::app::pipeline::{ApplyRun, PolyRun, RidgeRun};
use crate::error::AppError;

/// Output sink for pipeline runs.
pub trait Reporter {
    fn report_poly(&mut self, run: &PolyRun) -> Result<(), AppError>;
    fn report_ridge(&mut self, run: &RidgeRun) -> Result<(), AppError>;
    /// A stored ridge model applied to new data.
    fn report_apply(&mut self, run: &ApplyRun) -> Result<(), AppError>;
}
