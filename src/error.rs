//! Validation error types
//!
//! A payload either parses into its typed contract or produces a single
//! `ValidationError` listing every violation found. Nothing is retried or
//! recovered internally; there is no fatal condition in this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Required field absent from the payload
    MissingField,
    /// Value has the wrong JSON type
    WrongType,
    /// Value has the right type but a bad format (email, date)
    InvalidFormat,
    /// Numeric value or string length outside its bounds
    OutOfRange,
    /// Value not in the field's allow-list
    NotInEnum,
}

impl Rule {
    /// Returns the rule name used in serialized error reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::MissingField => "missing_field",
            Rule::WrongType => "wrong_type",
            Rule::InvalidFormat => "invalid_format",
            Rule::OutOfRange => "out_of_range",
            Rule::NotInEnum => "not_in_enum",
        }
    }
}

/// A single violated rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("field '{field}': {message}")]
pub struct Violation {
    /// Field path, `$root` for a non-object payload
    pub field: String,
    /// Rule kind
    pub rule: Rule,
    /// Human-readable description of the expected/actual mismatch
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }

    /// Required field absent from the payload.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, Rule::MissingField, "required field is missing")
    }

    /// Value of the wrong JSON type.
    pub fn wrong_type(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            field,
            Rule::WrongType,
            format!("expected {}, got {}", expected, actual),
        )
    }

    /// Well-typed value with a bad format.
    pub fn invalid_format(field: impl Into<String>, expected: &str) -> Self {
        Self::new(
            field,
            Rule::InvalidFormat,
            format!("expected {}", expected),
        )
    }

    /// Numeric value or string length outside its bounds.
    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Rule::OutOfRange, message)
    }

    /// Value not in the field's allow-list.
    pub fn not_in_enum(field: impl Into<String>, value: &str, allowed: &[&str]) -> Self {
        Self::new(
            field,
            Rule::NotInEnum,
            format!("'{}' is not one of [{}]", value, allowed.join(", ")),
        )
    }
}

/// Validation failure carrying every violation found in the payload.
///
/// Violations are accumulated, not short-circuited: a payload with three bad
/// fields reports all three.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Single-violation error.
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Returns true if the given field has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Result type for contract parsing.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::MissingField.as_str(), "missing_field");
        assert_eq!(Rule::WrongType.as_str(), "wrong_type");
        assert_eq!(Rule::InvalidFormat.as_str(), "invalid_format");
        assert_eq!(Rule::OutOfRange.as_str(), "out_of_range");
        assert_eq!(Rule::NotInEnum.as_str(), "not_in_enum");
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::wrong_type("age", "number", "string");
        let display = format!("{}", v);
        assert!(display.contains("age"));
        assert!(display.contains("number"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_error_counts_violations() {
        let err = ValidationError::new(vec![
            Violation::missing("email"),
            Violation::missing("name"),
        ]);
        assert!(format!("{}", err).contains("2 violation(s)"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("id"));
    }

    #[test]
    fn test_not_in_enum_lists_allowed_values() {
        let v = Violation::not_in_enum("sort_by", "popularity", &["title", "start_date"]);
        assert!(v.message.contains("popularity"));
        assert!(v.message.contains("title, start_date"));
    }

    #[test]
    fn test_error_serializes_rule_names() {
        let err = ValidationError::single(Violation::missing("id"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["violations"][0]["rule"], "missing_field");
    }
}
