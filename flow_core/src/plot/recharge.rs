//! # Recharge Plots
//!
//! Assembles the elevation and flux figures of the recharge dashboard.
//!
//! ## Trace Layout
//!
//! Trace positions are fixed so a retained figure can be patched in place:
//!
//! | Figure    | 0 | 1 | 2 | 3 |
//! |-----------|---|---|---|---|
//! | elevation | `h` water table | `d` divide marker | `qx` arrows | `topography` |
//! | flux      | `q` flux | `0` zero line | | |
//!
//! The arrow trace is always present; it is empty when arrows are hidden.

use serde::{Deserialize, Serialize};

use crate::calculations::recharge::{calculate, RechargeInput, RechargeResult};
use crate::calculations::sampling::{finite_max, linspace, nearest_index};
use crate::plot::figure::{Band, Figure, Rgb, Trace};
use crate::plot::quiver;

/// Elevation figure trace indices
pub mod elevation_trace {
    pub const HEAD: usize = 0;
    pub const DIVIDE: usize = 1;
    pub const ARROWS: usize = 2;
    pub const TOPOGRAPHY: usize = 3;
}

/// Flux figure trace indices
pub mod flux_trace {
    pub const FLUX: usize = 0;
    pub const ZERO: usize = 1;
}

/// Offsets (m) of the schematic land surface above the maximum head.
///
/// Illustrative only; not derived from the flow solution.
pub const TOPOGRAPHY_SHIFT: [f64; 17] = [
    5.0, 5.5, 5.8, 6.0, 5.8, 5.5, 6.3, 6.8, 7.0, 7.4, 7.8, 8.2, 8.0, 7.5, 6.8, 5.0, 4.0,
];

/// Shaded ground below the aquifer base
pub const GROUND_BAND: Band = Band {
    y0: -4.0,
    y1: 0.0,
    color: Rgb::GREY,
    opacity: 1.0,
};

/// Both figures of the recharge dashboard plus derived quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeView {
    pub elevation: Figure,
    pub flux: Figure,
    #[serde(with = "crate::nan_json::value")]
    pub divide_m: f64,
    #[serde(with = "crate::nan_json::value")]
    pub max_head_m: f64,
    pub diagnostics: Vec<String>,
}

/// Render both figures from scratch.
pub fn render_recharge(input: &RechargeInput, show_arrows: bool) -> RechargeView {
    let result = calculate(input);
    tracing::debug!(
        divide_m = result.divide_m,
        max_head_m = result.max_head_m,
        show_arrows,
        "rendering recharge figures"
    );

    let mut diagnostics = input.diagnostics();
    let undefined = result.undefined_count();
    if undefined > 0 {
        diagnostics.push(format!(
            "Water table undefined at {} of {} samples",
            undefined,
            result.x_m.len()
        ));
    }

    RechargeView {
        elevation: elevation_figure_from(input, &result, show_arrows),
        flux: flux_figure_from(input, &result),
        divide_m: result.divide_m,
        max_head_m: result.max_head_m,
        diagnostics,
    }
}

/// Elevation figure: water table, divide marker, arrows, topography.
pub fn elevation_figure(input: &RechargeInput, show_arrows: bool) -> Figure {
    elevation_figure_from(input, &calculate(input), show_arrows)
}

/// Flux figure: q(x) and the zero line.
pub fn flux_figure(input: &RechargeInput) -> Figure {
    flux_figure_from(input, &calculate(input))
}

fn elevation_figure_from(input: &RechargeInput, result: &RechargeResult, show_arrows: bool) -> Figure {
    let x = &result.x_m;
    let h = &result.head_m;
    let d = result.divide_m;
    let peak = finite_max(h);

    let divide_top = h.get(nearest_index(x, d)).copied().unwrap_or(f64::NAN);

    let (arrow_x, arrow_y) = match peak {
        Some(peak) if show_arrows => quiver::arrow_segments(&quiver::flow_arrows(input, peak)),
        _ => (Vec::new(), Vec::new()),
    };

    let (topo_x, topo_y) = topography_line(input.l_m, peak.unwrap_or(f64::NAN));

    Figure::new("Elevation Plot")
        .with_axes("x (m)", "Water Table Elevation (m)")
        .with_x_range(0.0, input.l_m)
        .with_trace(Trace::line("h", Rgb::MEDIUM_TURQUOISE, x.clone(), h.clone()))
        .with_trace(Trace::line("d", Rgb::FIRE_BRICK, vec![d, d], vec![0.0, divide_top]))
        .with_trace(Trace::line("qx", Rgb::ROYAL_BLUE, arrow_x, arrow_y).with_width(1.5))
        .with_trace(Trace::line("topography", Rgb::SIENNA, topo_x, topo_y))
        .with_band(GROUND_BAND)
}

fn flux_figure_from(input: &RechargeInput, result: &RechargeResult) -> Figure {
    let x = &result.x_m;
    let ends = match (x.first(), x.last()) {
        (Some(&first), Some(&last)) => vec![first, last],
        _ => Vec::new(),
    };
    let zeros = vec![0.0; ends.len()];

    Figure::new("q Plot")
        .with_axes("x (m)", "qx (m^2/day)")
        .with_x_range(0.0, input.l_m)
        .with_trace(Trace::line("q", Rgb::MEDIUM_PURPLE, x.clone(), result.flux_m2_per_day.clone()))
        .with_trace(Trace::line("0", Rgb::FIRE_BRICK, ends, zeros))
}

/// Schematic land surface: the shift table spread evenly over [0, L].
pub fn topography_line(l: f64, max_head_m: f64) -> (Vec<f64>, Vec<f64>) {
    let x = linspace(0.0, l, TOPOGRAPHY_SHIFT.len());
    let y = TOPOGRAPHY_SHIFT.iter().map(|shift| max_head_m + shift).collect();
    (x, y)
}
