//! Community challenge contracts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored challenge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Challenge {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let challenge_id = p.string("challenge_id");
        let title = p.string("title");
        let description = p.nullable_string("description");
        let start_date = p.date("start_date");
        let end_date = p.date("end_date");
        match (challenge_id, title, description, start_date, end_date) {
            (Some(challenge_id), Some(title), Some(description), Some(start_date), Some(end_date))
                if p.is_valid() =>
            {
                Ok(Self {
                    challenge_id,
                    title,
                    description,
                    start_date,
                    end_date,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for opening a new challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChallengeInput {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl CreateChallengeInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let title = p.bounded_string("title", 1, 255);
        let description = p.nullable_string("description");
        let start_date = p.date("start_date");
        let end_date = p.date("end_date");
        match (title, description, start_date, end_date) {
            (Some(title), Some(description), Some(start_date), Some(end_date)) if p.is_valid() => {
                Ok(Self {
                    title,
                    description,
                    start_date,
                    end_date,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `challenge_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateChallengeInput {
    pub challenge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl UpdateChallengeInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let challenge_id = p.string("challenge_id");
        let title = p.opt_bounded_string("title", 1, 255);
        let description = p.opt_nullable_string("description");
        let start_date = p.opt_date("start_date");
        let end_date = p.opt_date("end_date");
        match challenge_id {
            Some(challenge_id) if p.is_valid() => Ok(Self {
                challenge_id,
                title,
                description,
                start_date,
                end_date,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable challenge columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeSortKey {
    Title,
    StartDate,
}

impl SortKey for ChallengeSortKey {
    const ALLOWED: &'static [&'static str] = &["title", "start_date"];

    fn default_key() -> Self {
        ChallengeSortKey::StartDate
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(ChallengeSortKey::Title),
            "start_date" => Some(ChallengeSortKey::StartDate),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ChallengeSortKey::Title => "title",
            ChallengeSortKey::StartDate => "start_date",
        }
    }
}

pub type SearchChallengeInput = SearchInput<ChallengeSortKey>;
