//! # Unconfined Flow with Recharge
//!
//! Samples the water table and flux profile across a recharge strip and
//! derives the divide location and maximum head.
//!
//! ## Example
//!
//! ```rust
//! use flow_core::calculations::recharge::{calculate, RechargeInput};
//!
//! let input = RechargeInput {
//!     h1_m: 10.0,
//!     h2_m: 12.0,
//!     k_m_per_day: 5.0,
//!     w_m_per_day: 0.001,
//!     l_m: 1000.0,
//! };
//! let result = calculate(&input);
//!
//! assert!((result.divide_m - 610.0).abs() < 1e-9);
//! assert!(result.max_head_m > input.h2_m);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::sampling::strip_samples;
use crate::equations::recharge as eq;

/// Parameter set of the recharge dashboard.
///
/// ## JSON Example
///
/// ```json
/// {
///   "h1_m": 10.0,
///   "h2_m": 12.0,
///   "k_m_per_day": 5.0,
///   "w_m_per_day": 0.001,
///   "l_m": 1000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RechargeInput {
    /// Head at the left boundary, x = 0 (m)
    pub h1_m: f64,
    /// Head at the right boundary, x = L (m)
    pub h2_m: f64,
    /// Hydraulic conductivity (m/day)
    pub k_m_per_day: f64,
    /// Areal recharge rate (m/day)
    pub w_m_per_day: f64,
    /// Distance between the boundaries (m)
    pub l_m: f64,
}

impl Default for RechargeInput {
    fn default() -> Self {
        RechargeInput {
            h1_m: 10.0,
            h2_m: 12.0,
            k_m_per_day: 5.0,
            w_m_per_day: 0.001,
            l_m: 1000.0,
        }
    }
}

impl RechargeInput {
    /// Head at a single position (m)
    pub fn head_at(&self, x: f64) -> f64 {
        eq::head(self.h1_m, self.h2_m, self.k_m_per_day, self.w_m_per_day, self.l_m, x)
    }

    /// Flux at a single position (m²/day)
    pub fn flux_at(&self, x: f64) -> f64 {
        eq::flux(self.h1_m, self.h2_m, self.k_m_per_day, self.w_m_per_day, self.l_m, x)
    }

    /// Divide location d (m)
    pub fn divide_m(&self) -> f64 {
        divide(self.h1_m, self.h2_m, self.k_m_per_day, self.w_m_per_day, self.l_m)
    }

    /// Maximum head on the strip (m)
    pub fn max_head_m(&self) -> f64 {
        max_head(self.h1_m, self.h2_m, self.k_m_per_day, self.w_m_per_day, self.l_m)
    }

    /// Notes about parameter combinations that yield undefined samples.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.w_m_per_day == 0.0 {
            notes.push("No recharge: there is no groundwater divide".to_string());
        } else {
            let d = self.divide_m();
            if d.is_finite() && !(0.0..=self.l_m).contains(&d) {
                notes.push(format!(
                    "Divide at x = {:.1} m lies outside the strip; all flow exits one boundary",
                    d
                ));
            }
        }
        if self.k_m_per_day <= 0.0 {
            notes.push("K must be positive for a defined water table".to_string());
        }
        if self.l_m <= 0.0 {
            notes.push("Strip length L must be positive".to_string());
        }
        notes
    }
}

/// Adjustable parameters of the recharge dashboard (one slider each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RechargeParam {
    LeftHead,
    RightHead,
    Conductivity,
    Recharge,
    Length,
}

impl RechargeParam {
    pub const ALL: [RechargeParam; 5] = [
        RechargeParam::LeftHead,
        RechargeParam::RightHead,
        RechargeParam::Conductivity,
        RechargeParam::Recharge,
        RechargeParam::Length,
    ];

    /// Slider label, with units
    pub fn label(&self) -> &'static str {
        match self {
            RechargeParam::LeftHead => "Head at x = 0 (h1) (m)",
            RechargeParam::RightHead => "Head at x = L (h2) (m)",
            RechargeParam::Conductivity => "Hydraulic Conductivity (K) (m/d)",
            RechargeParam::Recharge => "Recharge (W) (m/d)",
            RechargeParam::Length => "Length (L) (m)",
        }
    }

    pub fn get(&self, input: &RechargeInput) -> f64 {
        match self {
            RechargeParam::LeftHead => input.h1_m,
            RechargeParam::RightHead => input.h2_m,
            RechargeParam::Conductivity => input.k_m_per_day,
            RechargeParam::Recharge => input.w_m_per_day,
            RechargeParam::Length => input.l_m,
        }
    }

    pub fn set(&self, input: &mut RechargeInput, value: f64) {
        match self {
            RechargeParam::LeftHead => input.h1_m = value,
            RechargeParam::RightHead => input.h2_m = value,
            RechargeParam::Conductivity => input.k_m_per_day = value,
            RechargeParam::Recharge => input.w_m_per_day = value,
            RechargeParam::Length => input.l_m = value,
        }
    }
}

/// Sampled profiles and derived quantities for a recharge strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeResult {
    /// Sample positions from 0 to L (m)
    pub x_m: Vec<f64>,
    /// Water-table elevation at each sample (m)
    #[serde(with = "crate::nan_json::values")]
    pub head_m: Vec<f64>,
    /// Flux at each sample (m²/day)
    #[serde(with = "crate::nan_json::values")]
    pub flux_m2_per_day: Vec<f64>,
    /// Divide location (m)
    #[serde(with = "crate::nan_json::value")]
    pub divide_m: f64,
    /// Maximum water-table elevation (m)
    #[serde(with = "crate::nan_json::value")]
    pub max_head_m: f64,
}

impl RechargeResult {
    /// Number of samples where the water table is undefined
    pub fn undefined_count(&self) -> usize {
        self.head_m.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Sample the strip and evaluate head, flux, divide and maximum head.
pub fn calculate(input: &RechargeInput) -> RechargeResult {
    let RechargeInput {
        h1_m: h1,
        h2_m: h2,
        k_m_per_day: k,
        w_m_per_day: w,
        l_m: l,
    } = *input;

    let x_m = strip_samples(l);
    RechargeResult {
        head_m: head(h1, h2, k, w, l, &x_m),
        flux_m2_per_day: flux(h1, h2, k, w, l, &x_m),
        divide_m: divide(h1, h2, k, w, l),
        max_head_m: max_head(h1, h2, k, w, l),
        x_m,
    }
}

/// h(x) for each x
pub fn head(h1: f64, h2: f64, k: f64, w: f64, l: f64, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| eq::head(h1, h2, k, w, l, xi)).collect()
}

/// q(x) for each x
pub fn flux(h1: f64, h2: f64, k: f64, w: f64, l: f64, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| eq::flux(h1, h2, k, w, l, xi)).collect()
}

/// Divide location d, where q(d) = 0
pub fn divide(h1: f64, h2: f64, k: f64, w: f64, l: f64) -> f64 {
    eq::divide(h1, h2, k, w, l)
}

/// Maximum head on [0, L]; h(d) when the divide is inside the strip
pub fn max_head(h1: f64, h2: f64, k: f64, w: f64, l: f64) -> f64 {
    eq::max_head(h1, h2, k, w, l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sampling::SAMPLE_COUNT;

    #[test]
    fn test_profiles_have_fixed_length() {
        for l in [100.0, 1000.0, 2000.0] {
            let input = RechargeInput { l_m: l, ..RechargeInput::default() };
            let result = calculate(&input);
            assert_eq!(result.x_m.len(), SAMPLE_COUNT);
            assert_eq!(result.head_m.len(), SAMPLE_COUNT);
            assert_eq!(result.flux_m2_per_day.len(), SAMPLE_COUNT);
        }
    }

    #[test]
    fn test_flux_zero_at_divide() {
        for (h1, h2, w) in [(10.0, 12.0, 0.001), (20.0, 18.0, 0.002), (15.0, 15.0, 0.0005)] {
            let input = RechargeInput { h1_m: h1, h2_m: h2, w_m_per_day: w, ..RechargeInput::default() };
            let d = input.divide_m();
            let q = flux(h1, h2, input.k_m_per_day, w, input.l_m, &[d])[0];
            assert!(q.abs() < 1e-12, "q(d) = {} for {:?}", q, input);
        }
    }

    #[test]
    fn test_symmetric_strip_divides_in_the_middle() {
        let input = RechargeInput { h1_m: 15.0, h2_m: 15.0, ..RechargeInput::default() };
        assert!((input.divide_m() - input.l_m / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_head_bounds_profile() {
        let result = calculate(&RechargeInput::default());
        for h in &result.head_m {
            assert!(*h <= result.max_head_m + 1e-9);
        }
    }

    #[test]
    fn test_divide_outside_strip_is_reported() {
        // Large head difference pushes the divide beyond x = L
        let input = RechargeInput { h1_m: 10.0, h2_m: 30.0, ..RechargeInput::default() };
        assert!(input.divide_m() > input.l_m);
        assert_eq!(input.diagnostics().len(), 1);
    }

    #[test]
    fn test_no_recharge_diagnostic() {
        let input = RechargeInput { w_m_per_day: 0.0, ..RechargeInput::default() };
        let notes = input.diagnostics();
        assert!(notes.iter().any(|n| n.contains("No recharge")));
        assert!(!input.divide_m().is_finite());
    }

    #[test]
    fn test_input_json_roundtrip() {
        let input = RechargeInput::default();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("w_m_per_day"));
        let back: RechargeInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);
    }
}
