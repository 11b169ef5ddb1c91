//! User contracts
//!
//! The account entity. `eco_level` is a nullable number defaulting to 0 when
//! absent; `email` must match email format in every contract that carries it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Gamified eco level; may be null, defaults to 0 when absent
    pub eco_level: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Validates a fully populated record as read from storage.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let id = p.string("id");
        let email = p.email("email");
        let name = p.string("name");
        let eco_level = p.nullable_number_or("eco_level", 0.0);
        let created_at = p.date("created_at");
        match (id, email, name, eco_level, created_at) {
            (Some(id), Some(email), Some(name), Some(eco_level), Some(created_at))
                if p.is_valid() =>
            {
                Ok(Self {
                    id,
                    email,
                    name,
                    eco_level,
                    created_at,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for inserting a new user. Server-generated fields (`id`,
/// `created_at`) are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub eco_level: Option<f64>,
}

impl CreateUserInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let email = p.email("email");
        let name = p.bounded_string("name", 1, 255);
        let eco_level = p.nullable_number_or("eco_level", 0.0);
        match (email, name, eco_level) {
            (Some(email), Some(name), Some(eco_level)) if p.is_valid() => Ok(Self {
                email,
                name,
                eco_level,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update: only `id` is required, present fields must still satisfy
/// their own constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the level, `None` leaves it untouched
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub eco_level: Option<Option<f64>>,
}

impl UpdateUserInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let id = p.string("id");
        let email = p.opt_email("email");
        let name = p.opt_bounded_string("name", 1, 255);
        let eco_level = p.opt_nullable_number("eco_level");
        match id {
            Some(id) if p.is_valid() => Ok(Self {
                id,
                email,
                name,
                eco_level,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable user columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSortKey {
    Name,
    CreatedAt,
}

impl SortKey for UserSortKey {
    const ALLOWED: &'static [&'static str] = &["name", "created_at"];

    fn default_key() -> Self {
        UserSortKey::CreatedAt
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(UserSortKey::Name),
            "created_at" => Some(UserSortKey::CreatedAt),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            UserSortKey::Name => "name",
            UserSortKey::CreatedAt => "created_at",
        }
    }
}

pub type SearchUserInput = SearchInput<UserSortKey>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;
    use serde_json::json;

    #[test]
    fn test_record_parses() {
        let user = User::parse(&json!({
            "id": "u1",
            "email": "alice@example.com",
            "name": "Alice",
            "eco_level": 3,
            "created_at": "2024-01-15T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.eco_level, Some(3.0));
    }

    #[test]
    fn test_record_bad_email_rejected() {
        let err = User::parse(&json!({
            "id": "u1",
            "email": "not-an-email",
            "name": "Alice",
            "created_at": "2024-01-15"
        }))
        .unwrap_err();
        assert!(err.has_field("email"));
        assert_eq!(err.violations[0].rule, Rule::InvalidFormat);
    }

    #[test]
    fn test_create_defaults_eco_level() {
        let input = CreateUserInput::parse(&json!({
            "email": "bob@example.com",
            "name": "Bob"
        }))
        .unwrap();
        assert_eq!(input.eco_level, Some(0.0));
    }

    #[test]
    fn test_create_keeps_explicit_null_eco_level() {
        let input = CreateUserInput::parse(&json!({
            "email": "bob@example.com",
            "name": "Bob",
            "eco_level": null
        }))
        .unwrap();
        assert_eq!(input.eco_level, None);
    }

    #[test]
    fn test_create_name_length_bounds() {
        let err = CreateUserInput::parse(&json!({
            "email": "bob@example.com",
            "name": ""
        }))
        .unwrap_err();
        assert!(err.has_field("name"));
    }

    #[test]
    fn test_update_id_only_is_enough() {
        let input = UpdateUserInput::parse(&json!({ "id": "u1" })).unwrap();
        assert_eq!(input.email, None);
        assert_eq!(input.eco_level, None);
    }

    #[test]
    fn test_update_present_email_still_checked() {
        let err = UpdateUserInput::parse(&json!({ "id": "u1", "email": "nope" })).unwrap_err();
        assert!(err.has_field("email"));
    }

    #[test]
    fn test_update_null_eco_level_is_explicit() {
        let input = UpdateUserInput::parse(&json!({ "id": "u1", "eco_level": null })).unwrap();
        assert_eq!(input.eco_level, Some(None));
    }
}
