//! Subcommands
//!
//! - `radial` - one-shot radial-flow evaluation
//! - `recharge` - one-shot recharge-strip evaluation
//! - `tui` - interactive dashboard

pub mod radial;
pub mod recharge;
pub mod tui;

/// Smallest and largest finite value, if any.
pub(crate) fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_range_skips_gaps() {
        assert_eq!(finite_range(&[3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
        assert_eq!(finite_range(&[]), None);
    }
}
