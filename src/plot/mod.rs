//! Chart rendering.
//!
//! - `ascii`: fixed-size character grids for the terminal
//! - `svg`: plotters SVG charts written to disk

pub mod ascii;
pub mod svg;

/// Finite min/max of `values`, widened when all values coincide.
pub(crate) fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    if max > min {
        Some((min, max))
    } else {
        Some((min - 0.5, max + 0.5))
    }
}

/// Evaluate `f` at `n` evenly spaced points over `[x_min, x_max]`.
pub(crate) fn sample_fn(x_min: f64, x_max: f64, n: usize, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, f(x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_ignores_non_finite_and_widens_flat_ranges() {
        let values = [2.0, f64::NAN, -1.0, f64::INFINITY];
        assert_eq!(span(values.into_iter()), Some((-1.0, 2.0)));
        assert_eq!(span([4.0, 4.0].into_iter()), Some((3.5, 4.5)));
        assert_eq!(span(std::iter::empty()), None);
    }

    #[test]
    fn sample_fn_hits_both_endpoints() {
        let pts = sample_fn(0.0, 2.0, 3, |x| x * x);
        assert_eq!(pts, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
    }
}
