//! User goal contracts
//!
//! Goals carry an opaque `milestones` blob with no internal shape
//! validation. `description` is required-but-nullable on create and
//! optional-nullable on update; the asymmetry comes from the stored
//! contract and is kept as is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored goal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGoal {
    pub goal_id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Opaque milestone data; absent normalizes to null
    #[serde(default)]
    pub milestones: Value,
    pub completion_status: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserGoal {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let goal_id = p.string("goal_id");
        let user_id = p.string("user_id");
        let title = p.string("title");
        let description = p.nullable_string("description");
        let milestones = p.any_nullable("milestones");
        let completion_status = p.bool_or("completion_status", false);
        let last_updated = p.nullable_date("last_updated");
        match (goal_id, user_id, title, description, completion_status, last_updated) {
            (
                Some(goal_id),
                Some(user_id),
                Some(title),
                Some(description),
                Some(completion_status),
                Some(last_updated),
            ) if p.is_valid() => Ok(Self {
                goal_id,
                user_id,
                title,
                description,
                milestones,
                completion_status,
                last_updated,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for inserting a new goal. `completion_status` defaults to false
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserGoalInput {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub milestones: Value,
    pub completion_status: bool,
}

impl CreateUserGoalInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_id = p.string("user_id");
        let title = p.bounded_string("title", 1, 255);
        let description = p.nullable_string("description");
        let milestones = p.any_nullable("milestones");
        let completion_status = p.bool_or("completion_status", false);
        match (user_id, title, description, completion_status) {
            (Some(user_id), Some(title), Some(description), Some(completion_status))
                if p.is_valid() =>
            {
                Ok(Self {
                    user_id,
                    title,
                    description,
                    milestones,
                    completion_status,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `goal_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserGoalInput {
    pub goal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::present_any"
    )]
    pub milestones: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub last_updated: Option<Option<DateTime<Utc>>>,
}

impl UpdateUserGoalInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let goal_id = p.string("goal_id");
        let user_id = p.opt_string("user_id");
        let title = p.opt_bounded_string("title", 1, 255);
        let description = p.opt_nullable_string("description");
        let milestones = p.opt_any("milestones");
        let completion_status = p.opt_bool("completion_status");
        let last_updated = p.opt_nullable_date("last_updated");
        match goal_id {
            Some(goal_id) if p.is_valid() => Ok(Self {
                goal_id,
                user_id,
                title,
                description,
                milestones,
                completion_status,
                last_updated,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable goal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserGoalSortKey {
    Title,
    LastUpdated,
}

impl SortKey for UserGoalSortKey {
    const ALLOWED: &'static [&'static str] = &["title", "last_updated"];

    fn default_key() -> Self {
        UserGoalSortKey::LastUpdated
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(UserGoalSortKey::Title),
            "last_updated" => Some(UserGoalSortKey::LastUpdated),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            UserGoalSortKey::Title => "title",
            UserGoalSortKey::LastUpdated => "last_updated",
        }
    }
}

pub type SearchUserGoalInput = SearchInput<UserGoalSortKey>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_parses_with_nulls() {
        let goal = UserGoal::parse(&json!({
            "goal_id": "g1",
            "user_id": "u1",
            "title": "Recycle more",
            "description": null,
            "milestones": null,
            "last_updated": null
        }))
        .unwrap();
        assert_eq!(goal.description, None);
        assert_eq!(goal.milestones, Value::Null);
        assert!(!goal.completion_status);
        assert_eq!(goal.last_updated, None);
    }

    #[test]
    fn test_record_requires_nullable_keys() {
        // description and last_updated may be null but the keys must exist
        let err = UserGoal::parse(&json!({
            "goal_id": "g1",
            "user_id": "u1",
            "title": "Recycle more"
        }))
        .unwrap_err();
        assert!(err.has_field("description"));
        assert!(err.has_field("last_updated"));
    }

    #[test]
    fn test_create_defaults_completion_status() {
        let input = CreateUserGoalInput::parse(&json!({
            "user_id": "u1",
            "title": "Recycle more",
            "description": null,
            "milestones": null
        }))
        .unwrap();
        assert!(!input.completion_status);
    }

    #[test]
    fn test_create_keeps_milestone_blob_verbatim() {
        let blob = json!({ "steps": ["sort glass", "compost"], "target": 5 });
        let input = CreateUserGoalInput::parse(&json!({
            "user_id": "u1",
            "title": "Zero waste",
            "description": "household plan",
            "milestones": blob.clone()
        }))
        .unwrap();
        assert_eq!(input.milestones, blob);
    }

    #[test]
    fn test_update_goal_id_only() {
        let input = UpdateUserGoalInput::parse(&json!({ "goal_id": "g1" })).unwrap();
        assert_eq!(input.description, None);
        assert_eq!(input.milestones, None);
    }

    #[test]
    fn test_update_distinguishes_null_description() {
        let input =
            UpdateUserGoalInput::parse(&json!({ "goal_id": "g1", "description": null })).unwrap();
        assert_eq!(input.description, Some(None));
    }

    #[test]
    fn test_update_title_still_bounded() {
        let err =
            UpdateUserGoalInput::parse(&json!({ "goal_id": "g1", "title": "" })).unwrap_err();
        assert!(err.has_field("title"));
    }
}
