//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - turns them into config structs
//! - runs the requested pipeline
//! - hands the run to the terminal, SVG and export reporters

use std::io;

use clap::Parser;

use crate::cli::{ApplyArgs, Cli, Command, PolyArgs, RidgeArgs};
use crate::domain::{ApplyConfig, PolyConfig, RidgeConfig};
use crate::error::AppError;
use crate::report::terminal::PlotSize;
use crate::report::{ExportReporter, Reporter, SvgReporter, TerminalReporter};

pub mod pipeline;

/// Entry point for the `regfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Poly(args) => handle_poly(&poly_config_from_args(&args)),
        Command::Ridge(args) => handle_ridge(&ridge_config_from_args(&args)),
        Command::Apply(args) => handle_apply(&apply_config_from_args(&args)),
    }
}

fn handle_poly(config: &PolyConfig) -> Result<(), AppError> {
    let run = pipeline::run_polyfit(config)?;

    for reporter in poly_reporters(config).iter_mut() {
        reporter.report_poly(&run)?;
    }
    Ok(())
}

fn handle_ridge(config: &RidgeConfig) -> Result<(), AppError> {
    let run = pipeline::run_ridge(config)?;

    for reporter in ridge_reporters(config).iter_mut() {
        reporter.report_ridge(&run)?;
    }
    Ok(())
}

fn handle_apply(config: &ApplyConfig) -> Result<(), AppError> {
    let run = pipeline::run_apply(config)?;

    for reporter in apply_reporters(config).iter_mut() {
        reporter.report_apply(&run)?;
    }
    Ok(())
}

fn poly_reporters(config: &PolyConfig) -> Vec<Box<dyn Reporter>> {
    let plot = config.plot.then_some(PlotSize {
        width: config.plot_width,
        height: config.plot_height,
    });
    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(
        TerminalReporter::new(io::stdout())
            .with_eval_at(config.eval_at)
            .with_plot(plot),
    )];
    if let Some(path) = &config.svg_path {
        reporters.push(Box::new(SvgReporter::new(path)));
    }
    reporters.push(Box::new(ExportReporter::for_poly(config)));
    reporters
}

fn ridge_reporters(config: &RidgeConfig) -> Vec<Box<dyn Reporter>> {
    let plot = config.plot.then_some(PlotSize {
        width: config.plot_width,
        height: config.plot_height,
    });
    let mut reporters: Vec<Box<dyn Reporter>> =
        vec![Box::new(TerminalReporter::new(io::stdout()).with_plot(plot))];
    if let Some(dir) = &config.svg_dir {
        reporters.push(Box::new(SvgReporter::new(dir)));
    }
    reporters.push(Box::new(ExportReporter::for_ridge(config)));
    reporters
}

fn apply_reporters(config: &ApplyConfig) -> Vec<Box<dyn Reporter>> {
    let plot = config.plot.then_some(PlotSize {
        width: config.plot_width,
        height: config.plot_height,
    });
    let mut reporters: Vec<Box<dyn Reporter>> =
        vec![Box::new(TerminalReporter::new(io::stdout()).with_plot(plot))];
    if let Some(dir) = &config.svg_dir {
        reporters.push(Box::new(SvgReporter::new(dir)));
    }
    reporters.push(Box::new(ExportReporter::for_apply(config)));
    reporters
}

pub fn poly_config_from_args(args: &PolyArgs) -> PolyConfig {
    PolyConfig {
        data_path: args.data.clone(),
        degrees: args.degrees.clone(),
        eval_at: args.eval_at,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg_path: args.svg.clone(),
        export_json: args.export.clone(),
    }
}

pub fn ridge_config_from_args(args: &RidgeArgs) -> RidgeConfig {
    RidgeConfig {
        train_path: args.train.clone(),
        deploy_path: args.deploy.clone(),
        test_fraction: args.test_fraction,
        lambda_min: args.lambda_min,
        lambda_max: args.lambda_max,
        lambda_steps: args.lambda_steps,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg_dir: args.svg_dir.clone(),
        export_model: args.export_model.clone(),
        export_predictions: args.export_predictions.clone(),
    }
}

pub fn apply_config_from_args(args: &ApplyArgs) -> ApplyConfig {
    ApplyConfig {
        model_path: args.model.clone(),
        data_path: args.data.clone(),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg_dir: args.svg_dir.clone(),
        export_predictions: args.export_predictions.clone(),
    }
}
