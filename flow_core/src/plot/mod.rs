//! # Plot Assembly
//!
//! Renderer-agnostic figure descriptions. Every render function here is a
//! pure function of its inputs; front ends keep the figure they show and
//! bring it up to date with [`Figure::update_from`], so trace count and
//! order never change while parameters move.
//!
//! - [`figure`] - Figure, trace and patch types
//! - [`radial`] - Radial dashboard (one solved variable against radius)
//! - [`recharge`] - Elevation and flux figures of the recharge strip
//! - [`quiver`] - Flow-direction arrows under the water table

pub mod figure;
pub mod quiver;
pub mod radial;
pub mod recharge;

pub use figure::{Band, Figure, FigurePatch, Rgb, Trace, Viewport};
pub use radial::{render_radial, RadialView, SliderVisibility};
pub use recharge::{render_recharge, RechargeView};
