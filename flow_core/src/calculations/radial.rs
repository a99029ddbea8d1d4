//! # Radial Flow to a Well
//!
//! Evaluates the Dupuit-Forchheimer radial-flow relation over a sequence of
//! outer radii, solving for whichever of Q, K, h1 or h2 is selected.
//!
//! ## Example
//!
//! ```rust
//! use flow_core::calculations::radial::{calculate, RadialInput, SolveFor};
//!
//! let input = RadialInput::default();
//! let result = calculate(SolveFor::Discharge, &input);
//!
//! assert_eq!(result.radius_m.len(), 1000);
//! assert_eq!(result.values.len(), 1000);
//! println!("Q at r2: {:.1} m³/day", result.values[999]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::sampling::radial_samples;
use crate::equations::radial as eq;
use crate::errors::{FlowError, FlowResult};

/// The variable solved for (plotted on the y-axis).
///
/// Serializes to the conventional symbol: `"Q"`, `"K"`, `"h1"`, `"h2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolveFor {
    /// Well discharge Q (m³/day)
    #[default]
    #[serde(rename = "Q")]
    Discharge,
    /// Hydraulic conductivity K (m/day)
    #[serde(rename = "K")]
    Conductivity,
    /// Head at the inner radius h1 (m)
    #[serde(rename = "h1")]
    InnerHead,
    /// Head at the outer radius h2 (m)
    #[serde(rename = "h2")]
    OuterHead,
}

/// Evaluates the selected variable over a radius sequence.
pub type RadialEvaluator = fn(&RadialInput, &[f64]) -> Vec<f64>;

/// Evaluator lookup table, indexed by `SolveFor as usize`.
const EVALUATORS: [(SolveFor, RadialEvaluator); 4] = [
    (SolveFor::Discharge, eval_discharge),
    (SolveFor::Conductivity, eval_conductivity),
    (SolveFor::InnerHead, eval_inner_head),
    (SolveFor::OuterHead, eval_outer_head),
];

impl SolveFor {
    pub const ALL: [SolveFor; 4] = [
        SolveFor::Discharge,
        SolveFor::Conductivity,
        SolveFor::InnerHead,
        SolveFor::OuterHead,
    ];

    /// Conventional symbol, also used as the y-axis title
    pub fn symbol(&self) -> &'static str {
        match self {
            SolveFor::Discharge => "Q",
            SolveFor::Conductivity => "K",
            SolveFor::InnerHead => "h1",
            SolveFor::OuterHead => "h2",
        }
    }

    /// Label for the variable selector
    pub fn display_name(&self) -> &'static str {
        match self {
            SolveFor::Discharge => "well discharge (Q)",
            SolveFor::Conductivity => "hydraulic conductivity (K)",
            SolveFor::InnerHead => "head at inner radius (h1)",
            SolveFor::OuterHead => "head at outer radius (h2)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SolveFor::Discharge => "m³/day",
            SolveFor::Conductivity => "m/day",
            SolveFor::InnerHead | SolveFor::OuterHead => "m",
        }
    }

    /// The input parameter this variable replaces (its slider is hidden)
    pub fn solved_param(&self) -> RadialParam {
        match self {
            SolveFor::Discharge => RadialParam::Discharge,
            SolveFor::Conductivity => RadialParam::Conductivity,
            SolveFor::InnerHead => RadialParam::InnerHead,
            SolveFor::OuterHead => RadialParam::OuterHead,
        }
    }

    /// Evaluator for this variable, taken from the lookup table
    pub fn evaluator(self) -> RadialEvaluator {
        EVALUATORS[self as usize].1
    }
}

impl fmt::Display for SolveFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SolveFor {
    type Err = FlowError;

    fn from_str(s: &str) -> FlowResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "discharge" => Ok(SolveFor::Discharge),
            "k" | "conductivity" => Ok(SolveFor::Conductivity),
            "h1" | "inner-head" => Ok(SolveFor::InnerHead),
            "h2" | "outer-head" => Ok(SolveFor::OuterHead),
            other => Err(FlowError::invalid_input(
                "solve_for",
                other,
                "Expected one of Q, K, h1, h2",
            )),
        }
    }
}

/// Adjustable parameters of the radial dashboard (one slider each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadialParam {
    Discharge,
    Conductivity,
    InnerHead,
    OuterHead,
    InnerRadius,
    OuterRadius,
}

impl RadialParam {
    pub const ALL: [RadialParam; 6] = [
        RadialParam::Discharge,
        RadialParam::Conductivity,
        RadialParam::InnerHead,
        RadialParam::OuterHead,
        RadialParam::InnerRadius,
        RadialParam::OuterRadius,
    ];

    /// Slider label, with units
    pub fn label(&self) -> &'static str {
        match self {
            RadialParam::Discharge => "Well Discharge (Q) (m3/d)",
            RadialParam::Conductivity => "Hydraulic Conductivity (K) (m/d)",
            RadialParam::InnerHead => "Head at Inner Radius (h1) (m)",
            RadialParam::OuterHead => "Head at Outer Radius (h2) (m)",
            RadialParam::InnerRadius => "Inner Radius (r1) (m)",
            RadialParam::OuterRadius => "Outer Radius (r2) (m)",
        }
    }

    pub fn get(&self, input: &RadialInput) -> f64 {
        match self {
            RadialParam::Discharge => input.q_m3_per_day,
            RadialParam::Conductivity => input.k_m_per_day,
            RadialParam::InnerHead => input.h1_m,
            RadialParam::OuterHead => input.h2_m,
            RadialParam::InnerRadius => input.r1_m,
            RadialParam::OuterRadius => input.r2_m,
        }
    }

    pub fn set(&self, input: &mut RadialInput, value: f64) {
        match self {
            RadialParam::Discharge => input.q_m3_per_day = value,
            RadialParam::Conductivity => input.k_m_per_day = value,
            RadialParam::InnerHead => input.h1_m = value,
            RadialParam::OuterHead => input.h2_m = value,
            RadialParam::InnerRadius => input.r1_m = value,
            RadialParam::OuterRadius => input.r2_m = value,
        }
    }

    /// Whether this parameter's slider is shown while solving for `solve_for`
    pub fn is_input_for(&self, solve_for: SolveFor) -> bool {
        solve_for.solved_param() != *self
    }
}

/// Parameter set of the radial-flow dashboard.
///
/// All four of Q, K, h1 and h2 are carried; the one being solved for is
/// ignored by the evaluator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "q_m3_per_day": 272.83,
///   "k_m_per_day": 8.0,
///   "h1_m": 50.0,
///   "h2_m": 100.0,
///   "r1_m": 0.1,
///   "r2_m": 1000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialInput {
    /// Well discharge (m³/day)
    pub q_m3_per_day: f64,
    /// Hydraulic conductivity (m/day)
    pub k_m_per_day: f64,
    /// Head at the inner radius (m)
    pub h1_m: f64,
    /// Head at the outer radius (m)
    pub h2_m: f64,
    /// Inner radius (m)
    pub r1_m: f64,
    /// Outer radius, the end of the plotted range (m)
    pub r2_m: f64,
}

impl Default for RadialInput {
    fn default() -> Self {
        RadialInput {
            q_m3_per_day: 272.83,
            k_m_per_day: 8.0,
            h1_m: 50.0,
            h2_m: 100.0,
            r1_m: 0.1,
            r2_m: 1000.0,
        }
    }
}

impl RadialInput {
    /// Notes about parameter combinations that yield undefined samples.
    ///
    /// These never block evaluation; they let a front end explain gaps or
    /// extreme values in the plot.
    pub fn diagnostics(&self, solve_for: SolveFor) -> Vec<String> {
        let mut notes = Vec::new();
        if self.r1_m <= 0.0 {
            notes.push("Inner radius r1 must be positive for ln(r/r1) to be finite".to_string());
        }
        if self.r2_m <= self.r1_m {
            notes.push("Outer radius r2 does not exceed inner radius r1".to_string());
        }
        match solve_for {
            SolveFor::Discharge => {}
            SolveFor::Conductivity => {
                if self.h1_m == self.h2_m {
                    notes.push("h1 = h2: conductivity is unbounded".to_string());
                }
            }
            SolveFor::InnerHead | SolveFor::OuterHead => {
                if self.k_m_per_day == 0.0 {
                    notes.push("K = 0: head is unbounded".to_string());
                }
            }
        }
        notes
    }
}

/// Sampled solution of the radial-flow relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialResult {
    /// Variable the values represent
    pub solve_for: SolveFor,
    /// Outer radii at which the relation was evaluated (m)
    pub radius_m: Vec<f64>,
    /// Solved values, one per radius
    #[serde(with = "crate::nan_json::values")]
    pub values: Vec<f64>,
}

impl RadialResult {
    /// Number of NaN or infinite samples
    pub fn undefined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Sample the radius range and solve for the selected variable.
pub fn calculate(solve_for: SolveFor, input: &RadialInput) -> RadialResult {
    let radius_m = radial_samples(input.r1_m, input.r2_m);
    let values = solve_for.evaluator()(input, &radius_m);
    RadialResult {
        solve_for,
        radius_m,
        values,
    }
}

// =============================================================================
// SEQUENCE FORMS
// One value per outer radius in `r`
// =============================================================================

/// Q(K, h1, h2, r1, r) for each r
pub fn discharge(k: f64, h1: f64, h2: f64, r1: f64, r: &[f64]) -> Vec<f64> {
    r.iter().map(|&ri| eq::discharge(k, h1, h2, r1, ri)).collect()
}

/// K(Q, h1, h2, r1, r) for each r
pub fn conductivity(q: f64, h1: f64, h2: f64, r1: f64, r: &[f64]) -> Vec<f64> {
    r.iter().map(|&ri| eq::conductivity(q, h1, h2, r1, ri)).collect()
}

/// h1(Q, K, h2, r1, r) for each r
pub fn inner_head(q: f64, k: f64, h2: f64, r1: f64, r: &[f64]) -> Vec<f64> {
    r.iter().map(|&ri| eq::inner_head(q, k, h2, r1, ri)).collect()
}

/// h2(Q, K, h1, r1, r) for each r
pub fn outer_head(q: f64, k: f64, h1: f64, r1: f64, r: &[f64]) -> Vec<f64> {
    r.iter().map(|&ri| eq::outer_head(q, k, h1, r1, ri)).collect()
}

fn eval_discharge(input: &RadialInput, r: &[f64]) -> Vec<f64> {
    discharge(input.k_m_per_day, input.h1_m, input.h2_m, input.r1_m, r)
}

fn eval_conductivity(input: &RadialInput, r: &[f64]) -> Vec<f64> {
    conductivity(input.q_m3_per_day, input.h1_m, input.h2_m, input.r1_m, r)
}

fn eval_inner_head(input: &RadialInput, r: &[f64]) -> Vec<f64> {
    inner_head(input.q_m3_per_day, input.k_m_per_day, input.h2_m, input.r1_m, r)
}

fn eval_outer_head(input: &RadialInput, r: &[f64]) -> Vec<f64> {
    outer_head(input.q_m3_per_day, input.k_m_per_day, input.h1_m, input.r1_m, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sampling::SAMPLE_COUNT;
    use std::f64::consts::PI;
    use std::hint::black_box;

    #[test]
    fn test_reference_discharge_is_exact() {
        let (k, h1, h2, r1, r) = black_box((8.0_f64, 50.0_f64, 100.0_f64, 0.1_f64, 1000.0_f64));
        let q = discharge(k, h1, h2, r1, &[r]);
        let expected = PI * k * (h2.powi(2) - h1.powi(2)) / (r / r1).ln();
        assert_eq!(q, vec![expected]);
    }

    #[test]
    fn test_conductivity_round_trip() {
        let (k, h1, h2, r1) = (8.0, 50.0, 100.0, 0.1);
        let r = radial_samples(r1, 1000.0);
        let q = discharge(k, h1, h2, r1, &r);

        for (qi, ri) in q.iter().zip(&r) {
            let k_back = conductivity(*qi, h1, h2, r1, &[*ri])[0];
            assert!((k_back - k).abs() < 1e-9 * k, "K = {} at r = {}", k_back, ri);
        }
    }

    #[test]
    fn test_head_round_trips() {
        let input = RadialInput::default();
        let r = radial_samples(input.r1_m, input.r2_m);
        let q = discharge(input.k_m_per_day, input.h1_m, input.h2_m, input.r1_m, &r);

        let h1 = r.iter().zip(&q).map(|(ri, qi)| inner_head(*qi, input.k_m_per_day, input.h2_m, input.r1_m, &[*ri])[0]);
        for h in h1 {
            assert!((h - input.h1_m).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lookup_table_order_matches_variants() {
        for (i, solve_for) in SolveFor::ALL.iter().enumerate() {
            assert_eq!(EVALUATORS[i].0, *solve_for);
            assert_eq!(*solve_for as usize, i);
        }
    }

    #[test]
    fn test_evaluator_dispatch() {
        let input = RadialInput::default();
        let r = [10.0, 100.0];
        assert_eq!(
            SolveFor::OuterHead.evaluator()(&input, &r),
            outer_head(input.q_m3_per_day, input.k_m_per_day, input.h1_m, input.r1_m, &r)
        );
        assert_eq!(
            SolveFor::Conductivity.evaluator()(&input, &r),
            conductivity(input.q_m3_per_day, input.h1_m, input.h2_m, input.r1_m, &r)
        );
    }

    #[test]
    fn test_calculate_has_fixed_length() {
        let mut input = RadialInput::default();
        input.r2_m = 10.0;
        for solve_for in SolveFor::ALL {
            let result = calculate(solve_for, &input);
            assert_eq!(result.radius_m.len(), SAMPLE_COUNT);
            assert_eq!(result.values.len(), SAMPLE_COUNT);
        }
    }

    #[test]
    fn test_degenerate_input_propagates_non_finite() {
        let mut input = RadialInput::default();
        input.h2_m = input.h1_m;
        let result = calculate(SolveFor::Conductivity, &input);
        assert_eq!(result.undefined_count(), SAMPLE_COUNT);
        assert!(!input.diagnostics(SolveFor::Conductivity).is_empty());
        assert!(input.diagnostics(SolveFor::Discharge).is_empty());
    }

    #[test]
    fn test_solve_for_parsing() {
        assert_eq!("Q".parse::<SolveFor>().unwrap(), SolveFor::Discharge);
        assert_eq!("k".parse::<SolveFor>().unwrap(), SolveFor::Conductivity);
        assert_eq!(" h2 ".parse::<SolveFor>().unwrap(), SolveFor::OuterHead);
        assert!("h3".parse::<SolveFor>().is_err());
    }

    #[test]
    fn test_solve_for_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&SolveFor::InnerHead).unwrap(), "\"h1\"");
        let back: SolveFor = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(back, SolveFor::Conductivity);
    }

    #[test]
    fn test_solved_param_is_hidden() {
        for solve_for in SolveFor::ALL {
            let hidden: Vec<_> = RadialParam::ALL
                .iter()
                .filter(|p| !p.is_input_for(solve_for))
                .collect();
            assert_eq!(hidden, vec![&solve_for.solved_param()]);
        }
    }

    #[test]
    fn test_param_accessors() {
        let mut input = RadialInput::default();
        RadialParam::OuterRadius.set(&mut input, 250.0);
        assert_eq!(RadialParam::OuterRadius.get(&input), 250.0);
        assert_eq!(input.r2_m, 250.0);
    }
}
