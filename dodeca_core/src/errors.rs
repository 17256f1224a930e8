//! # Error Types
//!
//! Two layers of errors live here:
//!
//! - [`CalculatorError`] - the flat taxonomy returned by the parameter
//!   calculator. Locale-agnostic: callers map it to a display string through
//!   [`crate::i18n`].
//! - [`CalcError`] - the crate-wide error, which wraps calculator failures and
//!   adds the file and lookup errors of the surrounding features.
//!
//! Both serialize to JSON so a front end can forward them verbatim.
//!
//! ## Example
//!
//! ```rust
//! use dodeca_core::errors::{CalcError, CalcResult};
//!
//! fn parse_edge(text: &str) -> CalcResult<f64> {
//!     text.trim().parse().map_err(|_| {
//!         CalcError::invalid_input("edge_length", text, "Not a number")
//!     })
//! }
//!
//! assert!(parse_edge("2.5").is_ok());
//! assert_eq!(parse_edge("abc").unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::QuantityKind;
use crate::i18n::MessageKey;

/// Result type alias for dodeca_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Outcome of a rejected calculator request.
///
/// The calculator never panics on user input; every rejection is one of
/// these variants.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalculatorError {
    /// Nothing was marked as known
    #[error("No parameters selected")]
    NoParametersSelected,

    /// A selected value is not a positive finite number, or is so extreme that
    /// the derived measures leave the `f64` range
    #[error("Invalid value for {quantity}: {value} (must be a positive number)")]
    InvalidValue { quantity: QuantityKind, value: String },

    /// More quantities selected than the calculator accepts
    #[error("Too many parameters selected: {selected} (maximum {max})")]
    TooManySelected { selected: usize, max: usize },

    /// Two known quantities describe different dodecahedra
    #[error("Inconsistent parameters: {second} disagrees with {first} (edge ratio {ratio:.4})")]
    InconsistentParameters {
        first: QuantityKind,
        second: QuantityKind,
        ratio: f64,
    },
}

impl CalculatorError {
    /// Create an InvalidValue error
    pub fn invalid_value(quantity: QuantityKind, value: f64) -> Self {
        CalculatorError::InvalidValue {
            quantity,
            value: value.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalculatorError::NoParametersSelected => "NO_PARAMETERS_SELECTED",
            CalculatorError::InvalidValue { .. } => "INVALID_VALUE",
            CalculatorError::TooManySelected { .. } => "TOO_MANY_SELECTED",
            CalculatorError::InconsistentParameters { .. } => "INCONSISTENT_PARAMETERS",
        }
    }

    /// Key of the user-facing message for this error
    pub fn message_key(&self) -> MessageKey {
        match self {
            CalculatorError::NoParametersSelected => MessageKey::ErrorNoParameters,
            CalculatorError::InvalidValue { .. } => MessageKey::ErrorInvalidValues,
            CalculatorError::TooManySelected { .. } => MessageKey::ErrorTooMany,
            CalculatorError::InconsistentParameters { .. } => MessageKey::ErrorInconsistent,
        }
    }
}

/// Crate-wide error type.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The calculator rejected its input
    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Practice problem number does not exist
    #[error("Problem not found: {number}")]
    ProblemNotFound { number: u32 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Calculator(e) => e.error_code(),
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ProblemNotFound { .. } => "PROBLEM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("edge_length", "-5.0", "Edge must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_calculator_error_keeps_nan_as_text() {
        let error = CalculatorError::invalid_value(QuantityKind::Volume, f64::NAN);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("NaN"));
        let roundtrip: CalculatorError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::from(CalculatorError::NoParametersSelected).error_code(),
            "NO_PARAMETERS_SELECTED"
        );
        assert_eq!(CalcError::ProblemNotFound { number: 9 }.error_code(), "PROBLEM_NOT_FOUND");
        assert_eq!(
            CalculatorError::TooManySelected { selected: 3, max: 2 }.error_code(),
            "TOO_MANY_SELECTED"
        );
    }

    #[test]
    fn test_message_keys() {
        let inconsistent = CalculatorError::InconsistentParameters {
            first: QuantityKind::Volume,
            second: QuantityKind::SurfaceArea,
            ratio: 1.2,
        };
        assert_eq!(inconsistent.message_key(), MessageKey::ErrorInconsistent);
        assert_eq!(
            CalculatorError::NoParametersSelected.message_key(),
            MessageKey::ErrorNoParameters
        );
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("prefs.json", "pid 42", "now").is_recoverable());
        assert!(!CalcError::serialization("bad json").is_recoverable());
    }
}
