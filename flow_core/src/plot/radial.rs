//! # Radial Plot
//!
//! The radial dashboard as a pure function: from the selected variable and
//! every slider value to the figure and the slider visibility flags.

use serde::{Deserialize, Serialize};

use crate::calculations::radial::{calculate, RadialInput, RadialParam, SolveFor};
use crate::plot::figure::{Figure, Rgb, Trace};

/// Which of the Q, K, h1, h2 sliders are shown.
///
/// The slider of the solved variable is hidden: it is an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderVisibility {
    pub q: bool,
    pub k: bool,
    pub h1: bool,
    pub h2: bool,
}

impl SliderVisibility {
    pub fn for_solved(solve_for: SolveFor) -> Self {
        SliderVisibility {
            q: solve_for != SolveFor::Discharge,
            k: solve_for != SolveFor::Conductivity,
            h1: solve_for != SolveFor::InnerHead,
            h2: solve_for != SolveFor::OuterHead,
        }
    }

    /// Visibility of any radial slider (the radii are always shown)
    pub fn is_visible(&self, param: RadialParam) -> bool {
        match param {
            RadialParam::Discharge => self.q,
            RadialParam::Conductivity => self.k,
            RadialParam::InnerHead => self.h1,
            RadialParam::OuterHead => self.h2,
            RadialParam::InnerRadius | RadialParam::OuterRadius => true,
        }
    }
}

/// Everything the radial dashboard shows for one input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialView {
    pub solve_for: SolveFor,
    pub figure: Figure,
    pub visibility: SliderVisibility,
    pub diagnostics: Vec<String>,
}

/// Recompute the radial dashboard from scratch.
pub fn render_radial(solve_for: SolveFor, input: &RadialInput) -> RadialView {
    tracing::debug!(solve_for = solve_for.symbol(), ?input, "rendering radial figure");

    let result = calculate(solve_for, input);
    let mut diagnostics = input.diagnostics(solve_for);
    let undefined = result.undefined_count();
    if undefined > 0 {
        diagnostics.push(format!(
            "{} undefined at {} of {} radii",
            solve_for.symbol(),
            undefined,
            result.values.len()
        ));
    }

    let figure = Figure::new(solve_for.display_name())
        .with_axes("r(m)", solve_for.symbol())
        .with_trace(Trace::line(
            solve_for.symbol(),
            Rgb::ROYAL_BLUE,
            result.radius_m,
            result.values,
        ));

    RadialView {
        solve_for,
        figure,
        visibility: SliderVisibility::for_solved(solve_for),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::sampling::SAMPLE_COUNT;

    #[test]
    fn test_solved_slider_is_hidden() {
        let v = SliderVisibility::for_solved(SolveFor::InnerHead);
        assert_eq!(v, SliderVisibility { q: true, k: true, h1: false, h2: true });
        assert!(v.is_visible(RadialParam::InnerRadius));
        assert!(!v.is_visible(RadialParam::InnerHead));
    }

    #[test]
    fn test_visibility_agrees_with_params() {
        for solve_for in SolveFor::ALL {
            let v = SliderVisibility::for_solved(solve_for);
            for param in RadialParam::ALL {
                assert_eq!(v.is_visible(param), param.is_input_for(solve_for));
            }
        }
    }

    #[test]
    fn test_render_radial_figure() {
        let view = render_radial(SolveFor::Conductivity, &RadialInput::default());
        assert_eq!(view.figure.trace_names(), vec!["K"]);
        assert_eq!(view.figure.y_label, "K");
        assert_eq!(view.figure.x_label, "r(m)");
        assert_eq!(view.figure.traces[0].x.len(), SAMPLE_COUNT);
        assert!(view.diagnostics.is_empty());
    }

    #[test]
    fn test_switching_variable_changes_trace_identity() {
        let input = RadialInput::default();
        let mut shown = render_radial(SolveFor::Discharge, &input).figure;
        let fresh = render_radial(SolveFor::OuterHead, &input).figure;
        // A different solved variable is a different layout, not a patch
        assert!(shown.update_from(&fresh).is_err());

        let same_layout = render_radial(SolveFor::Discharge, &RadialInput { k_m_per_day: 20.0, ..input }).figure;
        assert_eq!(shown.update_from(&same_layout).unwrap(), 1);
        assert_eq!(shown.traces.len(), 1);
    }

    #[test]
    fn test_undefined_samples_are_reported() {
        let input = RadialInput { q_m3_per_day: 1.0e7, ..RadialInput::default() };
        let view = render_radial(SolveFor::InnerHead, &input);
        assert!(view.diagnostics.iter().any(|d| d.contains("undefined")));
        assert_eq!(view.figure.traces[0].y.len(), SAMPLE_COUNT);
    }

    #[test]
    fn test_view_json_reads_back_undefined_samples() {
        let input = RadialInput { q_m3_per_day: 1.0e7, ..RadialInput::default() };
        let view = render_radial(SolveFor::InnerHead, &input);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("null"));

        let back: RadialView = serde_json::from_str(&json).unwrap();
        let (before, after) = (&view.figure.traces[0].y, &back.figure.traces[0].y);
        assert_eq!(after.len(), SAMPLE_COUNT);
        for (a, b) in before.iter().zip(after) {
            assert_eq!(a.is_finite(), b.is_finite());
        }
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }
}
