//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (snapshot-style assertions live here)

use crate::app::pipeline::{ApplyRun, PolyRun, RidgeRun};
use crate::models::PolyFit;
use crate::plot::span;

/// Dataset overview plus one block per fitted degree.
pub fn format_poly_summary(run: &PolyRun, eval_at: Option<f64>) -> String {
    let mut out = String::new();

    out.push_str("=== regfit - polynomial least squares ===\n");
    let (x_min, x_max) = span(run.samples.iter().map(|s| s.x)).unwrap_or((0.0, 0.0));
    let (y_min, y_max) = span(run.samples.iter().map(|s| s.y)).unwrap_or((0.0, 0.0));
    out.push_str(&format!(
        "Samples: n={} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n",
        run.samples.len()
    ));

    for fit in &run.fits {
        out.push_str(&format!("\nDegree {}:\n", fit.degree));
        out.push_str(&format!("- coefficients: {}\n", fmt_vec(&fit.coefficients)));
        out.push_str(&format!("- {}\n", poly_equation(fit)));
        if let Some(x) = eval_at {
            out.push_str(&format!("- y_hat({x}) = {:.6}\n", fit.predict(x)));
        }
    }
    out.push('\n');

    out
}

/// Split sizes, the λ sweep table, the chosen model and deployment error.
pub fn format_ridge_summary(run: &RidgeRun) -> String {
    let mut out = String::new();

    out.push_str("=== regfit - ridge regression ===\n");
    out.push_str(&format!(
        "Features ({}): {}\n",
        run.feature_names.len(),
        run.feature_names.join(", ")
    ));
    out.push_str(&format!("Split: train={} | test={}\n", run.n_train, run.n_test));

    out.push_str("\nLambda sweep (test MSE):\n");
    out.push_str(format!("  {:>12} {:>16}", "lambda", "mse").trim_end());
    out.push('\n');
    out.push_str(format!("  {:->12} {:->16}", "", "").trim_end());
    out.push('\n');
    for (i, p) in run.sweep.iter().enumerate() {
        let chosen = if i == run.best_index { "*" } else { " " };
        out.push_str(&format!("{chosen} {:>12.6} {:>16.6}\n", p.lambda, p.mse));
    }

    let best = run.best();
    out.push_str("\nChosen model:\n");
    out.push_str(&format!("- lambda: {:.6}\n", best.lambda));
    out.push_str(&format!("- test MSE: {:.6}\n", best.mse));
    out.push_str(&format!("- {}\n", best.model.equation()));

    let d = &run.deployment;
    out.push_str(&format!(
        "\nDeployment: n={} | MSE={:.6}\n\n",
        d.actual.len(),
        d.mse
    ));

    out
}

/// Stored model provenance plus its error on the new data.
pub fn format_apply_summary(run: &ApplyRun) -> String {
    let m = &run.model;
    let d = &run.deployment;
    let mut out = String::new();

    out.push_str("=== regfit - apply stored ridge model ===\n");
    out.push_str(&format!(
        "Model: trained on {} | lambda={:.6} | test MSE={:.6}\n",
        m.train_path, m.lambda, m.test_mse
    ));
    out.push_str(&format!("- {}\n", m.model.equation()));
    out.push_str(&format!("Data: n={} | MSE={:.6}\n\n", d.actual.len(), d.mse));

    out
}

/// `y_hat(x) = 2.0000x^2 + -1.0000x + 0.5000`
pub fn poly_equation(fit: &PolyFit) -> String {
    let degree = fit.coefficients.len().saturating_sub(1);
    let terms: Vec<String> = fit
        .coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| match degree - i {
            0 => format!("{c:.4}"),
            1 => format!("{c:.4}x"),
            p => format!("{c:.4}x^{p}"),
        })
        .collect();
    format!("y_hat(x) = {}", terms.join(" + "))
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
