//! # Steady Radial Flow to a Well (Dupuit-Forchheimer)
//!
//! Closed-form solutions for steady, unconfined radial flow between two
//! concentric cylinders of radius `r1` (inner, e.g. the well) and `r` (outer).
//!
//! ## Notation
//!
//! - `Q` = Well discharge (m³/day)
//! - `K` = Hydraulic conductivity (m/day)
//! - `h1` = Head at the inner radius (m)
//! - `h2` = Head at the outer radius (m)
//! - `r1` = Inner radius (m)
//! - `r` = Outer radius (m)
//!
//! ## Governing Relation
//!
//! ```text
//! Q = π·K·(h2² − h1²) / ln(r/r1)
//! ```
//!
//! Every function below isolates one variable of this relation.
//!
//! ## Degenerate Inputs
//!
//! At `r = r1` the log ratio is zero. Depending on the solved variable the
//! result is ±∞ or NaN. Nothing here rejects such inputs; callers offset
//! their first sample (see [`crate::calculations::sampling::radial_samples`]).

use std::f64::consts::PI;

/// Natural log of the radius ratio, ln(r/r1)
#[inline]
pub fn log_radius_ratio(r1: f64, r: f64) -> f64 {
    (r / r1).ln()
}

/// Solve for discharge Q given K, h1, h2, r1 and r
///
/// # Formula
/// - Q = π·K·(h2² − h1²) / ln(r/r1)
#[inline]
pub fn discharge(k: f64, h1: f64, h2: f64, r1: f64, r: f64) -> f64 {
    PI * k * (h2.powi(2) - h1.powi(2)) / log_radius_ratio(r1, r)
}

/// Solve for hydraulic conductivity K given Q, h1, h2, r1 and r
///
/// # Formula
/// - K = Q·ln(r/r1) / (π·(h2² − h1²))
///
/// Infinite when h1 = h2.
#[inline]
pub fn conductivity(q: f64, h1: f64, h2: f64, r1: f64, r: f64) -> f64 {
    q * log_radius_ratio(r1, r) / (PI * (h2.powi(2) - h1.powi(2)))
}

/// Solve for the inner head h1 given Q, K, h2, r1 and r
///
/// # Formula
/// - h1 = √(h2² − Q·ln(r/r1)/(π·K))
///
/// NaN once the drawdown term exceeds h2² (the well would run dry).
#[inline]
pub fn inner_head(q: f64, k: f64, h2: f64, r1: f64, r: f64) -> f64 {
    (h2.powi(2) - q * log_radius_ratio(r1, r) / (PI * k)).sqrt()
}

/// Solve for the outer head h2 given Q, K, h1, r1 and r
///
/// # Formula
/// - h2 = √(h1² + Q·ln(r/r1)/(π·K))
#[inline]
pub fn outer_head(q: f64, k: f64, h1: f64, r1: f64, r: f64) -> f64 {
    (h1.powi(2) + q * log_radius_ratio(r1, r) / (PI * k)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_discharge_reference_case() {
        // K = 8, h1 = 50, h2 = 100, r1 = 0.1, r = 1000
        // Q = π·8·7500 / ln(10000) ≈ 20465.7
        let q = discharge(8.0, 50.0, 100.0, 0.1, 1000.0);
        let expected = PI * 8.0 * 7500.0 / 10000f64.ln();
        assert!((q - expected).abs() <= expected * 1e-12, "Q = {}", q);
    }

    #[test]
    fn test_each_variable_recovers_the_others() {
        let (k, h1, h2, r1, r) = (12.0, 30.0, 42.0, 0.25, 350.0);
        let q = discharge(k, h1, h2, r1, r);

        assert!((conductivity(q, h1, h2, r1, r) - k).abs() < TOL);
        assert!((inner_head(q, k, h2, r1, r) - h1).abs() < TOL);
        assert!((outer_head(q, k, h1, r1, r) - h2).abs() < TOL);
    }

    #[test]
    fn test_equal_radii_are_not_finite() {
        assert!(discharge(8.0, 50.0, 100.0, 1.0, 1.0).is_infinite());
        // Zero log ratio in the numerator collapses K to zero
        assert_eq!(conductivity(100.0, 50.0, 100.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_equal_heads_give_zero_discharge_and_infinite_conductivity() {
        assert_eq!(discharge(8.0, 40.0, 40.0, 0.1, 100.0), 0.0);
        assert!(conductivity(100.0, 40.0, 40.0, 0.1, 100.0).is_infinite());
    }

    #[test]
    fn test_dry_well_is_nan() {
        // Drawdown term far larger than h2²
        assert!(inner_head(1.0e9, 1.0, 10.0, 0.1, 100.0).is_nan());
    }
}
