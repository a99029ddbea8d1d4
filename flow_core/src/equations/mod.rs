//! # Groundwater Flow Equations
//!
//! Scalar closed-form solutions of the Dupuit-Forchheimer equation. Keeping
//! the algebra in one place lets every front end and every sampled
//! calculation share a single implementation of each formula.
//!
//! ## Modules
//!
//! - [`radial`] - Steady radial flow to a well (solve for Q, K, h1 or h2)
//! - [`recharge`] - One-dimensional flow with uniform areal recharge
//!
//! ## Assumptions (Dupuit-Forchheimer)
//!
//! - Flow is horizontal; equipotentials are vertical
//! - Pressure is hydrostatic
//! - Homogeneous, isotropic aquifer on a horizontal impermeable base
//!
//! ## Units
//!
//! Metres and days throughout: heads and lengths in m, K and W in m/day,
//! radial discharge in m³/day, strip flux in m²/day.
//!
//! ## References
//!
//! - Fetter, C.W., Applied Hydrogeology, 4th Edition, Sections 6.2 and 6.3
//! - Freeze & Cherry, Groundwater, Section 8.1

pub mod radial;
pub mod recharge;
