//! Shared UI components reusable across dashboards
//!
//! Contains:
//! - `plot_canvas` - Canvas program drawing a `Figure` with wheel zoom
//! - `controls` - Labelled slider rows

pub mod controls;
pub mod plot_canvas;
