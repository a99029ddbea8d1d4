//! # Error Types
//!
//! Structured error types for flow_core. Formula evaluation itself never
//! fails (degenerate parameters produce NaN or infinite samples); errors
//! only surface at the edges: configuration files, figure patching and
//! user-typed input in the front ends.
//!
//! ## Example
//!
//! ```rust
//! use flow_core::errors::{FlowError, FlowResult};
//!
//! fn parse_length(raw: &str) -> FlowResult<f64> {
//!     raw.trim()
//!         .parse()
//!         .map_err(|_| FlowError::invalid_input("length_m", raw, "Not a number"))
//! }
//!
//! assert!(parse_length("12.5").is_ok());
//! assert_eq!(parse_length("abc").unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flow_core operations
pub type FlowResult<T> = Result<T, FlowError>;

/// Structured error type for dashboard operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FlowError {
    /// An input value is invalid (unparseable, unknown variable, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A dashboard configuration entry is inconsistent
    #[error("Invalid config '{setting}': {reason}")]
    InvalidConfig { setting: String, reason: String },

    /// A figure patch does not match the retained figure's trace layout
    #[error("Trace layout mismatch on '{figure}': expected [{expected}], got [{actual}]")]
    TraceLayoutMismatch {
        figure: String,
        expected: String,
        actual: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FlowError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FlowError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        FlowError::InvalidConfig {
            setting: setting.into(),
            reason: reason.into(),
        }
    }

    /// Create a TraceLayoutMismatch error from two lists of trace names
    pub fn trace_layout_mismatch(figure: impl Into<String>, expected: &[&str], actual: &[&str]) -> Self {
        FlowError::TraceLayoutMismatch {
            figure: figure.into(),
            expected: expected.join(", "),
            actual: actual.join(", "),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        FlowError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FlowError::InvalidInput { .. } => "INVALID_INPUT",
            FlowError::InvalidConfig { .. } => "INVALID_CONFIG",
            FlowError::TraceLayoutMismatch { .. } => "TRACE_LAYOUT_MISMATCH",
            FlowError::FileError { .. } => "FILE_ERROR",
            FlowError::SerializationError { .. } => "SERIALIZATION_ERROR",
            FlowError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FlowError::invalid_input("r1_m", "-0.5", "Radius must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: FlowError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FlowError::invalid_config("q", "bad").error_code(), "INVALID_CONFIG");
        assert_eq!(
            FlowError::trace_layout_mismatch("q Plot", &["q", "0"], &["q"]).error_code(),
            "TRACE_LAYOUT_MISMATCH"
        );
    }

    #[test]
    fn test_layout_mismatch_message_lists_traces() {
        let err = FlowError::trace_layout_mismatch("Elevation Plot", &["h", "d"], &["h"]);
        let msg = err.to_string();
        assert!(msg.contains("[h, d]"));
        assert!(msg.contains("[h]"));
    }

    #[test]
    fn test_from_serde_error() {
        let err: FlowError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
