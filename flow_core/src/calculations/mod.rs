//! # Flow Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Parameter set (JSON-serializable)
//! - `*Result` - Sampled sequences and derived quantities (JSON-serializable)
//! - `calculate(..) -> *Result` - Pure evaluation over a fixed-length sample
//!
//! Evaluation never fails. Degenerate parameters show up as NaN or infinite
//! samples and are explained by each input's `diagnostics()`.
//!
//! ## Available Calculations
//!
//! - [`radial`] - Radial flow to a well, solving for Q, K, h1 or h2
//! - [`recharge`] - Unconfined strip with uniform recharge
//! - [`sampling`] - Fixed-length sample sequences shared by both

pub mod radial;
pub mod recharge;
pub mod sampling;

// Re-export commonly used types
pub use radial::{RadialInput, RadialParam, RadialResult, SolveFor};
pub use recharge::{RechargeInput, RechargeParam, RechargeResult};
pub use sampling::SAMPLE_COUNT;
