//! Eco activity contracts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored activity log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoActivity {
    pub activity_id: String,
    pub user_id: String,
    pub activity_name: String,
    pub date_logged: DateTime<Utc>,
}

impl EcoActivity {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let activity_id = p.string("activity_id");
        let user_id = p.string("user_id");
        let activity_name = p.string("activity_name");
        let date_logged = p.date("date_logged");
        match (activity_id, user_id, activity_name, date_logged) {
            (Some(activity_id), Some(user_id), Some(activity_name), Some(date_logged))
                if p.is_valid() =>
            {
                Ok(Self {
                    activity_id,
                    user_id,
                    activity_name,
                    date_logged,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for logging a new activity. `date_logged` is caller-supplied, not
/// server-generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEcoActivityInput {
    pub user_id: String,
    pub activity_name: String,
    pub date_logged: DateTime<Utc>,
}

impl CreateEcoActivityInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_id = p.string("user_id");
        let activity_name = p.bounded_string("activity_name", 1, 255);
        let date_logged = p.date("date_logged");
        match (user_id, activity_name, date_logged) {
            (Some(user_id), Some(activity_name), Some(date_logged)) if p.is_valid() => Ok(Self {
                user_id,
                activity_name,
                date_logged,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `activity_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEcoActivityInput {
    pub activity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_logged: Option<DateTime<Utc>>,
}

impl UpdateEcoActivityInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let activity_id = p.string("activity_id");
        let user_id = p.opt_string("user_id");
        let activity_name = p.opt_bounded_string("activity_name", 1, 255);
        let date_logged = p.opt_date("date_logged");
        match activity_id {
            Some(activity_id) if p.is_valid() => Ok(Self {
                activity_id,
                user_id,
                activity_name,
                date_logged,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable activity columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoActivitySortKey {
    ActivityName,
    DateLogged,
}

impl SortKey for EcoActivitySortKey {
    const ALLOWED: &'static [&'static str] = &["activity_name", "date_logged"];

    fn default_key() -> Self {
        EcoActivitySortKey::DateLogged
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "activity_name" => Some(EcoActivitySortKey::ActivityName),
            "date_logged" => Some(EcoActivitySortKey::DateLogged),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            EcoActivitySortKey::ActivityName => "activity_name",
            EcoActivitySortKey::DateLogged => "date_logged",
        }
    }
}

pub type SearchEcoActivityInput = SearchInput<EcoActivitySortKey>;
