//! # Sample Sequences
//!
//! Evenly spaced positions at which the closed-form solutions are evaluated.
//! Every sequence has exactly [`SAMPLE_COUNT`] points whatever the parameters,
//! so a retained figure can be patched trace-by-trace without its arrays
//! changing length.

/// Number of points in every sampled sequence
pub const SAMPLE_COUNT: usize = 1000;

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
///
/// The last value is exactly `stop`. Returns `[start]` for `n == 1`.
///
/// ```rust
/// use flow_core::calculations::sampling::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Radii for the radial-flow plot: from just above `r1` out to `r2`.
///
/// The first sample is offset by `r2 / 1000` so that ln(r/r1) is never zero
/// there.
pub fn radial_samples(r1: f64, r2: f64) -> Vec<f64> {
    linspace(r1 + r2 / SAMPLE_COUNT as f64, r2, SAMPLE_COUNT)
}

/// Positions across the recharge strip, from 0 to `l`.
pub fn strip_samples(l: f64) -> Vec<f64> {
    linspace(0.0, l, SAMPLE_COUNT)
}

/// Largest finite value in a sequence, ignoring NaN and infinities.
pub fn finite_max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// Index of the sample closest to `target`.
///
/// Returns 0 for an empty slice or a non-finite target.
pub fn nearest_index(samples: &[f64], target: f64) -> usize {
    if !target.is_finite() {
        return 0;
    }
    samples
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(2.0, 7.0, 11);
        assert_eq!(xs.len(), 11);
        assert_eq!(xs[0], 2.0);
        assert_eq!(xs[10], 7.0);
        assert!((xs[1] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_sample_count_is_fixed() {
        for (r1, r2) in [(0.1, 1000.0), (0.0, 10.0), (2.0, 2.0), (5.0, 1.0)] {
            assert_eq!(radial_samples(r1, r2).len(), SAMPLE_COUNT);
        }
        for l in [100.0, 1000.0, 0.0, -5.0, f64::NAN] {
            assert_eq!(strip_samples(l).len(), SAMPLE_COUNT);
        }
    }

    #[test]
    fn test_radial_samples_start_above_inner_radius() {
        let r = radial_samples(0.1, 1000.0);
        assert!((r[0] - 1.1).abs() < 1e-12);
        assert_eq!(r[SAMPLE_COUNT - 1], 1000.0);
    }

    #[test]
    fn test_finite_max_skips_nan() {
        assert_eq!(finite_max(&[1.0, f64::NAN, 3.0, f64::INFINITY]), Some(3.0));
        assert_eq!(finite_max(&[f64::NAN]), None);
        assert_eq!(finite_max(&[]), None);
    }

    #[test]
    fn test_nearest_index() {
        let xs = linspace(0.0, 10.0, 11);
        assert_eq!(nearest_index(&xs, 6.2), 6);
        assert_eq!(nearest_index(&xs, -3.0), 0);
        assert_eq!(nearest_index(&xs, 42.0), 10);
        assert_eq!(nearest_index(&xs, f64::NAN), 0);
    }
}
