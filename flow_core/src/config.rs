//! # Dashboard Configuration
//!
//! Slider ranges, steps and starting values for both dashboards, stored as
//! JSON. A missing file is not an error: the built-in defaults are used.
//!
//! ## Example
//!
//! ```rust,no_run
//! use flow_core::config::{load_or_default, save_config, DashboardConfig};
//! use std::path::Path;
//!
//! let path = Path::new("phreatic.json");
//! let config = load_or_default(Some(path));
//! save_config(&config, path)?;
//! # Ok::<(), flow_core::errors::FlowError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::radial::{RadialInput, RadialParam, SolveFor};
use crate::calculations::recharge::{RechargeInput, RechargeParam};
use crate::errors::{FlowError, FlowResult};

/// Range, step and starting value of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderSpec {
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        SliderSpec { min, max, step, default }
    }

    /// Check min < max, step > 0 and min <= default <= max.
    pub fn validate(&self, name: &str) -> FlowResult<()> {
        let all_finite = [self.min, self.max, self.step, self.default]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FlowError::invalid_config(name, "values must be finite"));
        }
        if self.min >= self.max {
            return Err(FlowError::invalid_config(
                name,
                format!("min ({}) must be below max ({})", self.min, self.max),
            ));
        }
        if self.step <= 0.0 {
            return Err(FlowError::invalid_config(
                name,
                format!("step ({}) must be positive", self.step),
            ));
        }
        if self.default < self.min || self.default > self.max {
            return Err(FlowError::invalid_config(
                name,
                format!(
                    "default ({}) outside [{}, {}]",
                    self.default, self.min, self.max
                ),
            ));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` slider steps, staying inside the range.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        self.clamp(value + f64::from(steps) * self.step)
    }

    /// `value` with as many decimals as the step resolves.
    pub fn format(&self, value: f64) -> String {
        format_to_step(value, self.step)
    }
}

/// Format `value` to the resolution of `step`.
///
/// Steps of 1 or more (and non-positive steps) give no decimals. A value
/// that rounds to zero never prints as "-0".
pub fn format_to_step(value: f64, step: f64) -> String {
    let decimals = if !(step > 0.0) || step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().max(0.0) as usize
    };
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => magnitude.to_string(),
        _ => text,
    }
}

/// Radial dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    /// Variable selected at startup
    pub solve_for: SolveFor,
    pub discharge: SliderSpec,
    pub conductivity: SliderSpec,
    pub inner_head: SliderSpec,
    pub outer_head: SliderSpec,
    pub inner_radius: SliderSpec,
    pub outer_radius: SliderSpec,
}

impl Default for RadialConfig {
    fn default() -> Self {
        RadialConfig {
            solve_for: SolveFor::Discharge,
            discharge: SliderSpec::new(0.0, 500.0, 1.0, 272.83),
            conductivity: SliderSpec::new(0.0, 50.0, 1.0, 8.0),
            inner_head: SliderSpec::new(0.0, 100.0, 1.0, 50.0),
            outer_head: SliderSpec::new(0.0, 100.0, 1.0, 100.0),
            inner_radius: SliderSpec::new(0.0, 2.0, 0.01, 0.1),
            outer_radius: SliderSpec::new(10.0, 1000.0, 1.0, 1000.0),
        }
    }
}

impl RadialConfig {
    pub fn spec(&self, param: RadialParam) -> &SliderSpec {
        match param {
            RadialParam::Discharge => &self.discharge,
            RadialParam::Conductivity => &self.conductivity,
            RadialParam::InnerHead => &self.inner_head,
            RadialParam::OuterHead => &self.outer_head,
            RadialParam::InnerRadius => &self.inner_radius,
            RadialParam::OuterRadius => &self.outer_radius,
        }
    }

    /// Input built from every slider's default.
    pub fn initial_input(&self) -> RadialInput {
        let mut input = RadialInput::default();
        for param in RadialParam::ALL {
            param.set(&mut input, self.spec(param).default);
        }
        input
    }
}

/// Recharge dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RechargeConfig {
    /// Whether flow arrows are drawn at startup
    pub show_arrows: bool,
    pub left_head: SliderSpec,
    pub right_head: SliderSpec,
    pub conductivity: SliderSpec,
    pub recharge: SliderSpec,
    pub length: SliderSpec,
}

impl Default for RechargeConfig {
    fn default() -> Self {
        RechargeConfig {
            show_arrows: true,
            left_head: SliderSpec::new(0.0, 50.0, 0.5, 10.0),
            right_head: SliderSpec::new(0.0, 50.0, 0.5, 12.0),
            conductivity: SliderSpec::new(0.5, 50.0, 0.5, 5.0),
            recharge: SliderSpec::new(0.0, 0.005, 0.0001, 0.001),
            length: SliderSpec::new(100.0, 2000.0, 10.0, 1000.0),
        }
    }
}

impl RechargeConfig {
    pub fn spec(&self, param: RechargeParam) -> &SliderSpec {
        match param {
            RechargeParam::LeftHead => &self.left_head,
            RechargeParam::RightHead => &self.right_head,
            RechargeParam::Conductivity => &self.conductivity,
            RechargeParam::Recharge => &self.recharge,
            RechargeParam::Length => &self.length,
        }
    }

    pub fn initial_input(&self) -> RechargeInput {
        let mut input = RechargeInput::default();
        for param in RechargeParam::ALL {
            param.set(&mut input, self.spec(param).default);
        }
        input
    }
}

/// Settings for both dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub radial: RadialConfig,
    pub recharge: RechargeConfig,
    /// Start the desktop app in dark mode
    pub dark_mode: bool,
}

impl DashboardConfig {
    /// Validate every slider specification.
    pub fn validate(&self) -> FlowResult<()> {
        for param in RadialParam::ALL {
            self.radial.spec(param).validate(param.label())?;
        }
        for param in RechargeParam::ALL {
            self.recharge.spec(param).validate(param.label())?;
        }
        Ok(())
    }
}

/// Read and validate a configuration file.
///
/// # Errors
///
/// * `FlowError::FileError` - the file cannot be read
/// * `FlowError::SerializationError` - the file is not valid JSON
/// * `FlowError::InvalidConfig` - a slider specification is inconsistent
pub fn load_config(path: &Path) -> FlowResult<DashboardConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| FlowError::file_error("read", path.display().to_string(), e.to_string()))?;

    let config: DashboardConfig =
        serde_json::from_str(&contents).map_err(|e| FlowError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    config.validate()?;
    tracing::info!(path = %path.display(), "loaded dashboard configuration");
    Ok(config)
}

/// Load `path` if given, falling back to the defaults on any problem.
pub fn load_or_default(path: Option<&Path>) -> DashboardConfig {
    let Some(path) = path else {
        return DashboardConfig::default();
    };
    if !path.exists() {
        tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
        return DashboardConfig::default();
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "ignoring configuration file");
            DashboardConfig::default()
        }
    }
}

/// Write a configuration file atomically: temp file, sync, rename.
pub fn save_config(config: &DashboardConfig, path: &Path) -> FlowResult<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        FlowError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        FlowError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        FlowError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FlowError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "saved dashboard configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_config_path(name: &str) -> PathBuf {
        temp_dir().join(format!("phreatic_test_{}.json", name))
    }

    #[test]
    fn test_format_to_step() {
        assert_eq!(format_to_step(272.83, 1.0), "273");
        assert_eq!(format_to_step(200.0, 200.0), "200");
        assert_eq!(format_to_step(0.001, 0.0001), "0.0010");
        assert_eq!(format_to_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_to_step(5.0, 0.0), "5");
        assert_eq!(format_to_step(5.0, f64::NAN), "5");
        assert_eq!(format_to_step(-1e-18, 0.1), "0.0");
        assert_eq!(format_to_step(-0.2, 1.0), "0");
    }

    #[test]
    fn test_slider_format_uses_step() {
        let spec = SliderSpec::new(0.0, 0.01, 0.0001, 0.001);
        assert_eq!(spec.format(0.001), "0.0010");
        assert_eq!(SliderSpec::new(0.0, 5000.0, 1.0, 1000.0).format(999.6), "1000");
    }

    #[test]
    fn test_defaults_are_valid() {
        DashboardConfig::default().validate().unwrap();
    }

    #[test]
    fn test_initial_inputs_match_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.radial.initial_input(), RadialInput::default());
        assert_eq!(config.recharge.initial_input(), RechargeInput::default());
    }

    #[test]
    fn test_slider_spec_validation() {
        assert!(SliderSpec::new(0.0, 1.0, 0.1, 0.5).validate("x").is_ok());
        assert!(SliderSpec::new(1.0, 1.0, 0.1, 1.0).validate("x").is_err());
        assert!(SliderSpec::new(0.0, 1.0, 0.0, 0.5).validate("x").is_err());
        assert!(SliderSpec::new(0.0, 1.0, 0.1, 2.0).validate("x").is_err());
        assert!(SliderSpec::new(0.0, f64::NAN, 0.1, 0.5).validate("x").is_err());

        let err = SliderSpec::new(0.0, 1.0, -1.0, 0.5).validate("K").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_nudge_stays_in_range() {
        let spec = SliderSpec::new(0.0, 10.0, 1.0, 5.0);
        assert_eq!(spec.nudge(5.0, 1), 6.0);
        assert_eq!(spec.nudge(5.0, -2), 3.0);
        assert_eq!(spec.nudge(9.5, 3), 10.0);
        assert_eq!(spec.nudge(0.5, -3), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"radial": {"solve_for": "h2"}, "dark_mode": true}"#).unwrap();
        assert_eq!(config.radial.solve_for, SolveFor::OuterHead);
        assert_eq!(config.radial.discharge, RadialConfig::default().discharge);
        assert_eq!(config.recharge, RechargeConfig::default());
        assert!(config.dark_mode);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");
        let mut config = DashboardConfig::default();
        config.radial.solve_for = SolveFor::Conductivity;
        config.recharge.show_arrows = false;

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = temp_config_path("invalid");
        fs::write(&path, r#"{"recharge": {"length": {"min": 10, "max": 5, "step": 1, "default": 7}}}"#).unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert_eq!(load_or_default(Some(&path)), DashboardConfig::default());

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_config(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = temp_config_path("does_not_exist");
        let _ = fs::remove_file(&path);
        assert_eq!(load_or_default(Some(&path)), DashboardConfig::default());
        assert_eq!(load_or_default(None), DashboardConfig::default());
        assert_eq!(load_config(&path).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let path = temp_config_path("rejected");
        let mut config = DashboardConfig::default();
        config.radial.inner_radius.step = 0.0;
        assert!(save_config(&config, &path).is_err());
        assert!(!path.exists());
    }
}
