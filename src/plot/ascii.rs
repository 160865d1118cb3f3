//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! A chart is a list of series. Connected series are drawn first, in order,
//! and never overwrite each other; scatter series are drawn last on top.

use chrono::NaiveDate;

use super::{sample_fn, span};
use crate::app::pipeline::{Deployment, PolyRun, RidgeRun};

/// One series on an ASCII chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub marker: char,
    pub points: Vec<(f64, f64)>,
    /// Draw line segments between consecutive points.
    pub connect: bool,
}

impl Series {
    pub fn line(label: impl Into<String>, marker: char, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            marker,
            points,
            connect: true,
        }
    }

    pub fn scatter(label: impl Into<String>, marker: char, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            marker,
            points,
            connect: false,
        }
    }
}

/// Marker used for a fitted polynomial of the given degree.
pub fn degree_marker(degree: usize) -> char {
    u32::try_from(degree)
        .ok()
        .and_then(|d| char::from_digit(d, 10))
        .unwrap_or('*')
}

/// Raw data as `o` plus one curve per fitted degree.
pub fn render_poly_plot(run: &PolyRun, width: usize, height: usize) -> String {
    let data: Vec<(f64, f64)> = run.samples.iter().map(|s| (s.x, s.y)).collect();
    let (x_min, x_max) = span(data.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));

    let mut series = Vec::with_capacity(run.fits.len() + 1);
    for fit in &run.fits {
        let curve = sample_fn(x_min, x_max, width.max(2), |x| fit.predict(x));
        series.push(Series::line(format!("d={}", fit.degree), degree_marker(fit.degree), curve));
    }
    series.push(Series::scatter("data", 'o', data));

    render_chart("Polynomial fits", &series, width, height)
}

/// Test MSE against `log10(λ)`, with the selected λ marked `@`.
pub fn render_mse_plot(run: &RidgeRun, width: usize, height: usize) -> String {
    let curve: Vec<(f64, f64)> = run.sweep.iter().map(|p| (p.lambda.log10(), p.mse)).collect();
    let best = run.best();
    let series = vec![
        Series::line("test MSE", '*', curve),
        Series::scatter(
            format!("best lambda={:.4}", best.lambda),
            '@',
            vec![(best.lambda.log10(), best.mse)],
        ),
    ];
    render_chart("MSE vs lambda (x = log10 lambda)", &series, width, height)
}

/// Actual vs predicted next-day close over the deployment dataset.
pub fn render_deployment_plot(d: &Deployment, width: usize, height: usize) -> String {
    let actual: Vec<(f64, f64)> = d.actual.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
    let predicted: Vec<(f64, f64)> = d
        .predicted
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64, y))
        .collect();
    let title = format!("Deployment: actual vs predicted ({})", date_span(&d.dates));
    let series = vec![
        Series::line("actual", '-', actual),
        Series::line("predicted", '*', predicted),
    ];
    render_chart(&title, &series, width, height)
}

/// Render a chart of the given series on a `width × height` character grid.
pub fn render_chart(title: &str, series: &[Series], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let all = || series.iter().flat_map(|s| s.points.iter());
    let (x_min, x_max) = span(all().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = span(all().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw lines first (so points can overlay).
    for s in series.iter().filter(|s| s.connect) {
        draw_curve(&mut grid, &s.points, s.marker, x_min, x_max, y_min, y_max);
    }
    for s in series.iter().filter(|s| !s.connect) {
        for &(x, y) in &s.points {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            let col = map_x(x, x_min, x_max, width);
            let row = map_y(y, y_min, y_max, height);
            grid[row][col] = s.marker;
        }
    }

    // Build final string. We include a small header with ranges and a legend.
    let mut out = String::new();
    out.push_str(&format!(
        "{title}: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    let legend: Vec<String> = series.iter().map(|s| format!("{} {}", s.marker, s.label)).collect();
    out.push_str(&format!("Legend: {}\n", legend.join(", ")));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn date_span(dates: &[NaiveDate]) -> String {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "no rows".to_string(),
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => draw_line(grid, col, row, col, row, ch),
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;
    use crate::models::PolyFit;

    #[test]
    fn chart_golden_snapshot_small() {
        let series = vec![
            Series::line("fit", '-', vec![(1.0, 100.0), (10.0, 100.0)]),
            Series::scatter("data", 'o', vec![(1.0, 100.0), (10.0, 110.0)]),
        ];

        let txt = render_chart("Plot", &series, 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "Legend: - fit, o data\n",
            "         o\n",
            "\n",
            "\n",
            "\n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn poly_plot_has_one_legend_entry_per_degree() {
        let run = PolyRun {
            samples: (0..5).map(|i| Sample { x: i as f64, y: (i * i) as f64 }).collect(),
            fits: vec![
                PolyFit {
                    degree: 1,
                    coefficients: vec![4.0, -2.0],
                },
                PolyFit {
                    degree: 2,
                    coefficients: vec![1.0, 0.0, 0.0],
                },
            ],
        };
        let txt = render_poly_plot(&run, 40, 12);
        assert!(txt.contains("Legend: 1 d=1, 2 d=2, o data"), "{txt}");
        assert!(txt.contains('o'));
        // Header + legend + grid rows.
        assert_eq!(txt.lines().count(), 2 + 12);
    }

    #[test]
    fn degenerate_ranges_do_not_panic() {
        let series = vec![Series::scatter("one", 'x', vec![(3.0, 3.0)])];
        let txt = render_chart("Single", &series, 10, 5);
        assert!(txt.contains('x'));

        let empty = render_chart("Empty", &[], 10, 5);
        assert!(empty.starts_with("Empty: x=[0.000, 1.000]"));
    }

    #[test]
    fn degree_markers() {
        assert_eq!(degree_marker(3), '3');
        assert_eq!(degree_marker(12), '*');
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_degree_does_not_wrap_to_a_digit() {
        assert_eq!(degree_marker((1usize << 32) + 3), '*');
    }
}
