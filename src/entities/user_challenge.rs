//! User-challenge enrollment contracts
//!
//! `progress` defaults to 0 on the stored record but stays
//! optional-without-default on create; the stored contract declares them
//! differently and both shapes are kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored enrollment record linking a user to a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserChallenge {
    pub user_challenge_id: String,
    pub user_id: String,
    pub challenge_id: String,
    pub progress: Option<f64>,
}

impl UserChallenge {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_challenge_id = p.string("user_challenge_id");
        let user_id = p.string("user_id");
        let challenge_id = p.string("challenge_id");
        let progress = p.nullable_number_or("progress", 0.0);
        match (user_challenge_id, user_id, challenge_id, progress) {
            (Some(user_challenge_id), Some(user_id), Some(challenge_id), Some(progress))
                if p.is_valid() =>
            {
                Ok(Self {
                    user_challenge_id,
                    user_id,
                    challenge_id,
                    progress,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for enrolling a user in a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserChallengeInput {
    pub user_id: String,
    pub challenge_id: String,
    /// Optional and nullable, no default on create
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub progress: Option<Option<f64>>,
}

impl CreateUserChallengeInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_id = p.string("user_id");
        let challenge_id = p.string("challenge_id");
        let progress = p.opt_nullable_number("progress");
        match (user_id, challenge_id) {
            (Some(user_id), Some(challenge_id)) if p.is_valid() => Ok(Self {
                user_id,
                challenge_id,
                progress,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `user_challenge_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserChallengeInput {
    pub user_challenge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub progress: Option<Option<f64>>,
}

impl UpdateUserChallengeInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_challenge_id = p.string("user_challenge_id");
        let user_id = p.opt_string("user_id");
        let challenge_id = p.opt_string("challenge_id");
        let progress = p.opt_nullable_number("progress");
        match user_challenge_id {
            Some(user_challenge_id) if p.is_valid() => Ok(Self {
                user_challenge_id,
                user_id,
                challenge_id,
                progress,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable enrollment columns. `progress` is the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserChallengeSortKey {
    Progress,
}

impl SortKey for UserChallengeSortKey {
    const ALLOWED: &'static [&'static str] = &["progress"];

    fn default_key() -> Self {
        UserChallengeSortKey::Progress
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "progress" => Some(UserChallengeSortKey::Progress),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            UserChallengeSortKey::Progress => "progress",
        }
    }
}

pub type SearchUserChallengeInput = SearchInput<UserChallengeSortKey>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_defaults_progress() {
        let uc = UserChallenge::parse(&json!({
            "user_challenge_id": "uc1",
            "user_id": "u1",
            "challenge_id": "c1"
        }))
        .unwrap();
        assert_eq!(uc.progress, Some(0.0));
    }

    #[test]
    fn test_create_progress_stays_absent() {
        let input = CreateUserChallengeInput::parse(&json!({
            "user_id": "u1",
            "challenge_id": "c1"
        }))
        .unwrap();
        assert_eq!(input.progress, None);
    }

    #[test]
    fn test_create_progress_explicit_null() {
        let input = CreateUserChallengeInput::parse(&json!({
            "user_id": "u1",
            "challenge_id": "c1",
            "progress": null
        }))
        .unwrap();
        assert_eq!(input.progress, Some(None));
    }

    #[test]
    fn test_only_progress_is_sortable() {
        let err = SearchUserChallengeInput::parse(&json!({ "sort_by": "user_id" })).unwrap_err();
        assert!(err.has_field("sort_by"));
        let input = SearchUserChallengeInput::parse(&json!({})).unwrap();
        assert_eq!(input.sort_by, UserChallengeSortKey::Progress);
    }
}
