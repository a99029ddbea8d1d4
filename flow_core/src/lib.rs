//! # flow_core - Groundwater Formula Engine
//!
//! `flow_core` evaluates closed-form groundwater flow relations and turns
//! them into renderer-agnostic figures. All inputs, results and figures are
//! JSON-serializable, so the same output drives the desktop app, the terminal
//! dashboard and `--json` scripting.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Formulas and render functions are pure
//! - **Never fails on physics**: Degenerate parameters give NaN/∞ samples, not errors
//! - **Explicit updates**: Front ends patch retained figures with [`Figure::update_from`]
//! - **Rich Errors**: Structured errors at the edges (config files, figure patches)
//!
//! ## Quick Start
//!
//! ```rust
//! use flow_core::calculations::{RechargeInput, SolveFor, RadialInput};
//! use flow_core::plot::{render_radial, render_recharge};
//!
//! let radial = render_radial(SolveFor::Discharge, &RadialInput::default());
//! assert_eq!(radial.figure.trace_names(), vec!["Q"]);
//! assert!(!radial.visibility.q);
//!
//! let recharge = render_recharge(&RechargeInput::default(), true);
//! assert!((recharge.divide_m - 610.0).abs() < 1e-9);
//!
//! let json = serde_json::to_string(&recharge.elevation).unwrap();
//! assert!(json.contains("topography"));
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Scalar flow formulas
//! - [`calculations`] - Inputs, sampled results and parameter metadata
//! - [`plot`] - Figure assembly and diff/patch
//! - [`config`] - Slider configuration with atomic saves
//! - [`errors`] - Structured error types
//! - [`nan_json`] - `null` for undefined samples in JSON

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod nan_json;
pub mod plot;

// Re-export commonly used types at crate root for convenience
pub use calculations::{RadialInput, RechargeInput, SolveFor};
pub use config::{load_config, load_or_default, save_config, DashboardConfig, SliderSpec};
pub use errors::{FlowError, FlowResult};
pub use plot::{render_radial, render_recharge, Figure, FigurePatch};
