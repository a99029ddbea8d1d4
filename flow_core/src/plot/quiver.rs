//! # Flow-Direction Arrows
//!
//! Builds the quiver overlay of the elevation plot: a coarse grid over the
//! saturated zone, masked to the points that lie at or below the water
//! table, with one horizontal arrow per surviving point sized by the local
//! flux.
//!
//! The scale constants are purely visual and carry no physical meaning.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::recharge::RechargeInput;
use crate::calculations::sampling::linspace;

/// Grid columns across the strip
pub const GRID_COLUMNS: usize = 8;
/// Grid rows from the base up to 5/6 of the maximum head
pub const GRID_ROWS: usize = 5;
/// Fraction of the maximum head covered by the top grid row
pub const GRID_TOP_FRACTION: f64 = 5.0 / 6.0;
/// Multiplier from flux (m²/day) to arrow x-component
pub const ARROW_GAIN: f64 = 20.0;
/// Scale from arrow vector to drawn shaft length
pub const VECTOR_SCALE: f64 = 0.1;
/// Barb length as a fraction of the shaft
pub const BARB_SCALE: f64 = 0.3;
/// Half-angle between the shaft and each barb (radians)
pub const BARB_ANGLE: f64 = PI / (9.0 * 16.0);

/// A grid position (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

/// An arrow anchored at (x, y) with vector (u, v).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

/// Row-major grid: x from L/8 to 7L/8, y from 0 to `top`.
pub fn grid(l: f64, top: f64) -> Vec<GridPoint> {
    let xs = linspace(l / 8.0, l - l / 8.0, GRID_COLUMNS);
    let ys = linspace(0.0, top, GRID_ROWS);
    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| GridPoint { x, y }))
        .collect()
}

/// Keep only points at or below the water table.
///
/// Points where the water table is undefined are dropped as well.
pub fn mask_below<F>(points: &[GridPoint], water_table: F) -> Vec<GridPoint>
where
    F: Fn(f64) -> f64,
{
    points
        .iter()
        .copied()
        .filter(|p| p.y <= water_table(p.x))
        .collect()
}

/// Masked arrows for a recharge strip.
///
/// `max_head_m` sets the grid height; a non-finite or non-positive value
/// yields no arrows.
pub fn flow_arrows(input: &RechargeInput, max_head_m: f64) -> Vec<Arrow> {
    if !(max_head_m.is_finite() && max_head_m > 0.0) {
        return Vec::new();
    }
    let points = grid(input.l_m, GRID_TOP_FRACTION * max_head_m);
    mask_below(&points, |x| input.head_at(x))
        .into_iter()
        .map(|p| Arrow {
            x: p.x,
            y: p.y,
            u: input.flux_at(p.x) * ARROW_GAIN,
            v: 0.0,
        })
        .collect()
}

/// Line segments for drawing arrows: each shaft, then each barb pair.
///
/// Segments are separated by NaN so the result fits in a single trace.
pub fn arrow_segments(arrows: &[Arrow]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(arrows.len() * 7);
    let mut ys = Vec::with_capacity(arrows.len() * 7);

    let ends: Vec<(f64, f64)> = arrows
        .iter()
        .map(|a| (a.x + a.u * VECTOR_SCALE, a.y + a.v * VECTOR_SCALE))
        .collect();

    for (a, &(x_end, y_end)) in arrows.iter().zip(&ends) {
        xs.extend([a.x, x_end, f64::NAN]);
        ys.extend([a.y, y_end, f64::NAN]);
    }

    for (a, &(x_end, y_end)) in arrows.iter().zip(&ends) {
        let barb_len = (x_end - a.x).hypot(y_end - a.y) * BARB_SCALE;
        let heading = (y_end - a.y).atan2(x_end - a.x);
        let (left, right) = (heading + BARB_ANGLE, heading - BARB_ANGLE);
        xs.extend([
            x_end - barb_len * left.cos(),
            x_end,
            x_end - barb_len * right.cos(),
            f64::NAN,
        ]);
        ys.extend([
            y_end - barb_len * left.sin(),
            y_end,
            y_end - barb_len * right.sin(),
            f64::NAN,
        ]);
    }

    (xs, ys)
}
