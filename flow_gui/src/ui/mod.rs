//! UI module for the Phreatic dashboard
//!
//! # Panel Structure
//! - `toolbar` - Title, dashboard tabs, light/dark toggle
//! - `radial_panel` - Solved-variable selector, radial sliders, radial plot
//! - `recharge_panel` - Recharge sliders, arrow toggle, elevation and flux plots
//! - `status_bar` - Derived quantities and diagnostics
//!
//! # Shared Components
//! - `shared/plot_canvas` - Canvas rendering of any `flow_core` figure
//! - `shared/controls` - Labelled sliders

pub mod radial_panel;
pub mod recharge_panel;
pub mod status_bar;
pub mod toolbar;

pub mod shared;
