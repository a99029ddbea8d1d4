//! # Unconfined Flow with Uniform Recharge
//!
//! Steady one-dimensional Dupuit-Forchheimer flow in an unconfined aquifer
//! strip of length `L` between two fixed-head boundaries, with uniform areal
//! recharge `W` on top.
//!
//! ```text
//!        W  W  W  W  W  W
//!        ↓  ↓  ↓  ↓  ↓  ↓
//!          ___-----___
//!  h1 ___--     ↑     --___ h2
//!   |           d           |
//!   |←──────── L ──────────→|
//!  x=0                     x=L
//! ```
//!
//! ## Notation
//!
//! - `h1`, `h2` = Heads at x = 0 and x = L (m)
//! - `K` = Hydraulic conductivity (m/day)
//! - `W` = Recharge rate (m/day)
//! - `L` = Distance between the boundaries (m)
//! - `x` = Position from the left boundary (m)
//!
//! ## Sign Conventions
//!
//! - Flux `q` is positive toward +x (left to right)
//! - The divide `d` is where `q` changes sign
//!
//! Argument order is always `(h1, h2, k, w, l[, x])`.

/// Squared head at position x
///
/// # Formula
/// - h²(x) = h1² − (h1² − h2²)·x/L + (W/K)·x·(L − x)
#[inline]
pub fn head_squared(h1: f64, h2: f64, k: f64, w: f64, l: f64, x: f64) -> f64 {
    h1.powi(2) - (h1.powi(2) - h2.powi(2)) * x / l + (w / k) * x * (l - x)
}

/// Water-table elevation h(x)
///
/// NaN where the squared head goes negative (strong outflow with no recharge).
#[inline]
pub fn head(h1: f64, h2: f64, k: f64, w: f64, l: f64, x: f64) -> f64 {
    head_squared(h1, h2, k, w, l, x).sqrt()
}

/// Discharge per unit width q(x) in m²/day
///
/// # Formula
/// - q(x) = K·(h1² − h2²)/(2L) − W·(L/2 − x)
///
/// Derived from q = −K·h·dh/dx = −(K/2)·d(h²)/dx.
#[inline]
pub fn flux(h1: f64, h2: f64, k: f64, w: f64, l: f64, x: f64) -> f64 {
    k * (h1.powi(2) - h2.powi(2)) / (2.0 * l) - w * (l / 2.0 - x)
}

/// Location of the groundwater divide, where q(d) = 0
///
/// # Formula
/// - d = L/2 − K·(h1² − h2²)/(2·W·L)
///
/// With no recharge (W = 0) there is no divide and the result is ±∞ or NaN.
/// A divide outside [0, L] means all flow leaves through one boundary.
#[inline]
pub fn divide(h1: f64, h2: f64, k: f64, w: f64, l: f64) -> f64 {
    l / 2.0 - k * (h1.powi(2) - h2.powi(2)) / (2.0 * w * l)
}

/// Maximum water-table elevation on the strip
///
/// h(d) when the divide lies inside [0, L]; otherwise the higher boundary
/// head. h² is quadratic in x, so the peak is at the divide or an end.
#[inline]
pub fn max_head(h1: f64, h2: f64, k: f64, w: f64, l: f64) -> f64 {
    // max/min instead of clamp: no panic on NaN d or a degenerate L
    let d = divide(h1, h2, k, w, l).max(0.0).min(l);
    head(h1, h2, k, w, l, d)
        .max(head(h1, h2, k, w, l, 0.0))
        .max(head(h1, h2, k, w, l, l))
}

#[cfg(test)]
mod tests {
    use super::*;

    // h1 = 10, h2 = 12, K = 5, W = 0.001, L = 1000
    const CASE: (f64, f64, f64, f64, f64) = (10.0, 12.0, 5.0, 0.001, 1000.0);

    #[test]
    fn test_head_matches_boundary_conditions() {
        let (h1, h2, k, w, l) = CASE;
        assert!((head(h1, h2, k, w, l, 0.0) - h1).abs() < 1e-12);
        assert!((head(h1, h2, k, w, l, l) - h2).abs() < 1e-12);
    }

    #[test]
    fn test_divide_location() {
        let (h1, h2, k, w, l) = CASE;
        // d = 500 − 5·(100 − 144)/(2·0.001·1000) = 610
        assert!((divide(h1, h2, k, w, l) - 610.0).abs() < 1e-9);
    }

    #[test]
    fn test_flux_vanishes_at_divide() {
        let (h1, h2, k, w, l) = CASE;
        let d = divide(h1, h2, k, w, l);
        assert!(flux(h1, h2, k, w, l, d).abs() < 1e-12);
    }

    #[test]
    fn test_flux_at_boundaries() {
        let (h1, h2, k, w, l) = CASE;
        // Flow leaves through both ends: negative at x = 0, positive at x = L
        assert!((flux(h1, h2, k, w, l, 0.0) + 0.61).abs() < 1e-12);
        assert!((flux(h1, h2, k, w, l, l) - 0.39).abs() < 1e-12);
    }

    #[test]
    fn test_flux_balances_recharge() {
        // Outflow at both ends equals total recharge W·L
        let (h1, h2, k, w, l) = CASE;
        let out = flux(h1, h2, k, w, l, l) - flux(h1, h2, k, w, l, 0.0);
        assert!((out - w * l).abs() < 1e-12);
    }

    #[test]
    fn test_max_head_is_the_peak() {
        let (h1, h2, k, w, l) = CASE;
        let h_max = max_head(h1, h2, k, w, l);
        assert!((h_max - 13.2068).abs() < 1e-3);
        for i in 0..=100 {
            let x = l * i as f64 / 100.0;
            assert!(head(h1, h2, k, w, l, x) <= h_max + 1e-12);
        }
    }

    #[test]
    fn test_max_head_at_boundary_when_divide_outside() {
        // d = 2500 lies beyond L, so the peak is the right-hand head
        let (h1, h2, k, w, l) = (10.0, 30.0, 5.0, 0.001, 1000.0);
        assert!(divide(h1, h2, k, w, l) > l);
        assert!((max_head(h1, h2, k, w, l) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_head_without_recharge() {
        assert!((max_head(10.0, 12.0, 5.0, 0.0, 1000.0) - 12.0).abs() < 1e-12);
        assert!((max_head(10.0, 10.0, 5.0, 0.0, 1000.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_recharge_has_no_finite_divide() {
        assert!(!divide(10.0, 12.0, 5.0, 0.0, 1000.0).is_finite());
        assert!(divide(10.0, 10.0, 5.0, 0.0, 1000.0).is_nan());
    }
}
