//! # Error Types
//!
//! Structured error types for runway_core. Every public operation returns
//! [`CalcResult`], and errors serialize to JSON the same way results do so
//! a caller can report them without string parsing.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for runway_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Section or stiffener geometry that would make a derived property meaningless
    #[error("Invalid geometry for {component}: {reason}")]
    InvalidGeometry { component: String, reason: String },

    /// No crane placement fits on the span, so there is nothing to design for
    #[error("No valid load configuration: {reason}")]
    NoValidLoadCases { reason: String },

    /// A formula was evaluated outside its domain (negative root, non-finite result)
    #[error("Formula domain error in {formula}: {reason}")]
    FormulaDomain { formula: String, reason: String },

    /// Rolled shape or channel designation not present in the catalog
    #[error("Shape not found: {designation}")]
    ShapeNotFound { designation: String },

    /// Calculation failed for a reason other than bad input
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
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

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(component: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoValidLoadCases error
    pub fn no_valid_load_cases(reason: impl Into<String>) -> Self {
        CalcError::NoValidLoadCases { reason: reason.into() }
    }

    /// Create a FormulaDomain error
    pub fn formula_domain(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FormulaDomain {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Create a ShapeNotFound error
    pub fn shape_not_found(designation: impl Into<String>) -> Self {
        CalcError::ShapeNotFound {
            designation: designation.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::NoValidLoadCases { .. } => "NO_VALID_LOAD_CASES",
            CalcError::FormulaDomain { .. } => "FORMULA_DOMAIN",
            CalcError::ShapeNotFound { .. } => "SHAPE_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Square root that refuses negative or non-finite arguments.
///
/// `formula` names the expression being evaluated so the error points at it.
pub fn checked_sqrt(value: f64, formula: &str) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::formula_domain(formula, format!("argument is not finite ({})", value)));
    }
    if value < 0.0 {
        return Err(CalcError::formula_domain(formula, format!("negative argument under square root ({:.6e})", value)));
    }
    Ok(value.sqrt())
}

/// Reject NaN and infinities produced by an otherwise valid expression.
pub fn ensure_finite(value: f64, formula: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::formula_domain(formula, format!("result is not finite ({})", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("span_m", "-5.0", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_geometry("web", "tw = 0").error_code(), "INVALID_GEOMETRY");
        assert_eq!(CalcError::no_valid_load_cases("no crane fits on a 4.5 m span").error_code(), "NO_VALID_LOAD_CASES");
        assert_eq!(CalcError::shape_not_found("IPE 999").error_code(), "SHAPE_NOT_FOUND");
        assert_eq!(CalcError::formula_domain("Lr", "negative").error_code(), "FORMULA_DOMAIN");
    }

    #[test]
    fn test_checked_sqrt() {
        assert!((checked_sqrt(16.0, "x").unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(checked_sqrt(0.0, "x").unwrap(), 0.0);

        let err = checked_sqrt(-1.0, "Lr").unwrap_err();
        assert_eq!(err.error_code(), "FORMULA_DOMAIN");
        assert!(err.to_string().contains("Lr"));

        assert!(checked_sqrt(f64::NAN, "x").is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(1.5, "x").is_ok());
        assert!(ensure_finite(f64::INFINITY, "x").is_err());
        assert!(ensure_finite(f64::NAN, "x").is_err());
    }
}
