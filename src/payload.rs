//! Payload extraction over untyped JSON
//!
//! A `Payload` wraps one JSON object and hands out typed field values.
//! Failed reads record a violation and keep going, so a bad payload reports
//! every offending field instead of just the first one. Readers never mutate
//! the input; extraction is deterministic.
//!
//! Reader families:
//! - required: `string`, `bounded_string`, `nonempty_string`, `email`,
//!   `date`, plus nullable variants where the key must be present but the
//!   value may be `null`
//! - defaulted: `bool_or`, `nullable_number_or`, and the pagination readers
//!   `positive_int_or` / `nonnegative_int_or`
//! - optional (`opt_*`): absent keys are skipped, present values must still
//!   satisfy their own constraint
//! - opaque: `any_nullable` / `opt_any` accept any JSON verbatim

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationResult, Violation};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Returns the JSON type name for violation messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Deserializes `Option<Option<T>>` so that an explicit `null` becomes
/// `Some(None)` instead of collapsing into `None`. Pair with
/// `#[serde(default)]` so an absent key still becomes `None`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserializes `Option<Value>` keeping an explicit `null` as
/// `Some(Value::Null)`. Pair with `#[serde(default)]` for absent keys.
pub(crate) fn present_any<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Field reader over a JSON object that accumulates violations.
pub struct Payload<'a> {
    map: &'a Map<String, Value>,
    violations: Vec<Violation>,
}

impl<'a> Payload<'a> {
    /// Wraps a payload. A non-object root fails immediately with a single
    /// `$root` violation.
    pub fn new(value: &'a Value) -> ValidationResult<Self> {
        match value.as_object() {
            Some(map) => Ok(Self {
                map,
                violations: Vec::new(),
            }),
            None => Err(ValidationError::single(Violation::wrong_type(
                "$root",
                "object",
                json_type_name(value),
            ))),
        }
    }

    /// True if no violation has been recorded so far.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the reader, failing if any violation was recorded.
    pub fn finish(self) -> ValidationResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    /// Consumes the reader into its accumulated error.
    ///
    /// Callers reach this only after at least one reader returned `None`,
    /// so the violation list is non-empty.
    pub fn into_error(self) -> ValidationError {
        debug_assert!(!self.violations.is_empty());
        ValidationError::new(self.violations)
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    // ==================
    // Required readers
    // ==================

    /// Required string of any length.
    pub fn string(&mut self, field: &str) -> Option<String> {
        match self.map.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(Violation::wrong_type(field, "string", json_type_name(other)));
                None
            }
            None => {
                self.push(Violation::missing(field));
                None
            }
        }
    }

    /// Required string with char count within `min..=max`.
    pub fn bounded_string(&mut self, field: &str, min: usize, max: usize) -> Option<String> {
        let s = self.string(field)?;
        self.check_length(field, s, min, Some(max))
    }

    /// Required string with at least one char.
    pub fn nonempty_string(&mut self, field: &str) -> Option<String> {
        let s = self.string(field)?;
        self.check_length(field, s, 1, None)
    }

    /// Required string matching email format.
    pub fn email(&mut self, field: &str) -> Option<String> {
        let s = self.string(field)?;
        if email_regex().is_match(&s) {
            Some(s)
        } else {
            self.push(Violation::invalid_format(field, "a valid email address"));
            None
        }
    }

    /// Required key whose value is a string or `null`.
    pub fn nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.map.get(field) {
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.push(Violation::wrong_type(
                    field,
                    "string or null",
                    json_type_name(other),
                ));
                None
            }
            None => {
                self.push(Violation::missing(field));
                None
            }
        }
    }

    /// Nullable number with a default: absent yields the default, `null`
    /// stays null, a number passes through.
    pub fn nullable_number_or(&mut self, field: &str, default: f64) -> Option<Option<f64>> {
        match self.map.get(field) {
            None => Some(Some(default)),
            Some(Value::Null) => Some(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(x) => Some(Some(x)),
                None => {
                    self.push(Violation::wrong_type(field, "number or null", "number"));
                    None
                }
            },
            Some(other) => {
                self.push(Violation::wrong_type(
                    field,
                    "number or null",
                    json_type_name(other),
                ));
                None
            }
        }
    }

    /// Bool with a default applied when the key is absent.
    pub fn bool_or(&mut self, field: &str, default: bool) -> Option<bool> {
        match self.map.get(field) {
            None => Some(default),
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.push(Violation::wrong_type(field, "bool", json_type_name(other)));
                None
            }
        }
    }

    /// Required date-coercible value, normalized to UTC.
    pub fn date(&mut self, field: &str) -> Option<DateTime<Utc>> {
        match self.map.get(field) {
            Some(value) => self.coerce_date(field, value),
            None => {
                self.push(Violation::missing(field));
                None
            }
        }
    }

    /// Required key whose value is date-coercible or `null`.
    pub fn nullable_date(&mut self, field: &str) -> Option<Option<DateTime<Utc>>> {
        match self.map.get(field) {
            Some(Value::Null) => Some(None),
            Some(value) => self.coerce_date(field, value).map(Some),
            None => {
                self.push(Violation::missing(field));
                None
            }
        }
    }

    /// Opaque JSON blob: any value verbatim, absent normalizes to `null`.
    /// Never records a violation.
    pub fn any_nullable(&mut self, field: &str) -> Value {
        self.map.get(field).cloned().unwrap_or(Value::Null)
    }

    // ==================
    // Optional readers (partial updates)
    // ==================

    /// Optional string; absent keys are skipped.
    pub fn opt_string(&mut self, field: &str) -> Option<String> {
        match self.map.get(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(Violation::wrong_type(field, "string", json_type_name(other)));
                None
            }
        }
    }

    /// Optional string with char count within `min..=max`.
    pub fn opt_bounded_string(&mut self, field: &str, min: usize, max: usize) -> Option<String> {
        let s = self.opt_string(field)?;
        self.check_length(field, s, min, Some(max))
    }

    /// Optional string with at least one char.
    pub fn opt_nonempty_string(&mut self, field: &str) -> Option<String> {
        let s = self.opt_string(field)?;
        self.check_length(field, s, 1, None)
    }

    /// Optional string matching email format.
    pub fn opt_email(&mut self, field: &str) -> Option<String> {
        let s = self.opt_string(field)?;
        if email_regex().is_match(&s) {
            Some(s)
        } else {
            self.push(Violation::invalid_format(field, "a valid email address"));
            None
        }
    }

    /// Optional bool.
    pub fn opt_bool(&mut self, field: &str) -> Option<bool> {
        match self.map.get(field) {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.push(Violation::wrong_type(field, "bool", json_type_name(other)));
                None
            }
        }
    }

    /// Optional date-coercible value.
    pub fn opt_date(&mut self, field: &str) -> Option<DateTime<Utc>> {
        match self.map.get(field) {
            None => None,
            Some(value) => self.coerce_date(field, value),
        }
    }

    /// Optional nullable string: absent is skipped, `null` is an explicit
    /// null (`Some(None)`).
    pub fn opt_nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.map.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.push(Violation::wrong_type(
                    field,
                    "string or null",
                    json_type_name(other),
                ));
                None
            }
        }
    }

    /// Optional nullable number.
    pub fn opt_nullable_number(&mut self, field: &str) -> Option<Option<f64>> {
        match self.map.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(x) => Some(Some(x)),
                None => {
                    self.push(Violation::wrong_type(field, "number or null", "number"));
                    None
                }
            },
            Some(other) => {
                self.push(Violation::wrong_type(
                    field,
                    "number or null",
                    json_type_name(other),
                ));
                None
            }
        }
    }

    /// Optional nullable date-coercible value.
    pub fn opt_nullable_date(&mut self, field: &str) -> Option<Option<DateTime<Utc>>> {
        match self.map.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.coerce_date(field, value).map(Some),
        }
    }

    /// Optional opaque JSON blob; absent is skipped, anything else (null
    /// included) passes verbatim.
    pub fn opt_any(&mut self, field: &str) -> Option<Value> {
        self.map.get(field).cloned()
    }

    // ==================
    // Pagination readers
    // ==================

    /// Integer > 0 with a default applied when absent.
    pub fn positive_int_or(&mut self, field: &str, default: i64) -> Option<i64> {
        let n = self.int_or(field, default)?;
        if n > 0 {
            Some(n)
        } else {
            self.push(Violation::out_of_range(
                field,
                format!("expected a positive integer, got {}", n),
            ));
            None
        }
    }

    /// Integer >= 0 with a default applied when absent.
    pub fn nonnegative_int_or(&mut self, field: &str, default: i64) -> Option<i64> {
        let n = self.int_or(field, default)?;
        if n >= 0 {
            Some(n)
        } else {
            self.push(Violation::out_of_range(
                field,
                format!("expected a non-negative integer, got {}", n),
            ));
            None
        }
    }

    /// Allow-listed keyword with a default applied when absent.
    pub fn keyword_or(
        &mut self,
        field: &str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Option<String> {
        match self.map.get(field) {
            None => Some(default.to_string()),
            Some(Value::String(s)) => {
                if allowed.contains(&s.as_str()) {
                    Some(s.clone())
                } else {
                    self.push(Violation::not_in_enum(field, s, allowed));
                    None
                }
            }
            Some(other) => {
                self.push(Violation::wrong_type(field, "string", json_type_name(other)));
                None
            }
        }
    }

    fn int_or(&mut self, field: &str, default: i64) -> Option<i64> {
        match self.map.get(field) {
            None => Some(default),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Some(i),
                None => {
                    self.push(Violation::wrong_type(field, "integer", "number"));
                    None
                }
            },
            Some(other) => {
                self.push(Violation::wrong_type(
                    field,
                    "integer",
                    json_type_name(other),
                ));
                None
            }
        }
    }

    fn check_length(
        &mut self,
        field: &str,
        s: String,
        min: usize,
        max: Option<usize>,
    ) -> Option<String> {
        let len = s.chars().count();
        if len < min {
            self.push(Violation::out_of_range(
                field,
                format!("expected at least {} character(s), got {}", min, len),
            ));
            return None;
        }
        if let Some(max) = max {
            if len > max {
                self.push(Violation::out_of_range(
                    field,
                    format!("expected at most {} characters, got {}", max, len),
                ));
                return None;
            }
        }
        Some(s)
    }

    fn coerce_date(&mut self, field: &str, value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => match parse_date_string(s) {
                Some(dt) => Some(dt),
                None => {
                    self.push(Violation::invalid_format(
                        field,
                        "an RFC 3339 or YYYY-MM-DD date",
                    ));
                    None
                }
            },
            Value::Number(n) => match n.as_i64().and_then(epoch_millis) {
                Some(dt) => Some(dt),
                None => {
                    self.push(Violation::invalid_format(
                        field,
                        "an integer epoch-milliseconds timestamp",
                    ));
                    None
                }
            },
            other => {
                self.push(Violation::wrong_type(field, "date", json_type_name(other)));
                None
            }
        }
    }
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
