//! Entity registry and dynamic dispatch
//!
//! Callers that route requests by entity name (a generic CRUD router, an
//! admin surface) get one entry point per operation. The payload is parsed
//! through the entity's typed contract and handed back as normalized JSON:
//! defaults applied, dates in RFC 3339 UTC, absent blobs as null.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{
    Challenge, CreateChallengeInput, CreateEcoActivityInput, CreateFeedbackAndSupportInput,
    CreateNotificationInput, CreateResourceInput, CreateUserChallengeInput, CreateUserGoalInput,
    CreateUserInput, EcoActivity, FeedbackAndSupport, Notification, Resource,
    SearchChallengeInput, SearchEcoActivityInput, SearchFeedbackAndSupportInput,
    SearchNotificationInput, SearchResourceInput, SearchUserChallengeInput, SearchUserGoalInput,
    SearchUserInput, UpdateChallengeInput, UpdateEcoActivityInput, UpdateFeedbackAndSupportInput,
    UpdateNotificationInput, UpdateResourceInput, UpdateUserChallengeInput, UpdateUserGoalInput,
    UpdateUserInput, User, UserChallenge, UserGoal,
};
use crate::error::ValidationResult;

/// The eight validated entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    User,
    UserGoal,
    EcoActivity,
    Resource,
    Challenge,
    UserChallenge,
    Notification,
    FeedbackAndSupport,
}

impl Entity {
    pub const ALL: [Entity; 8] = [
        Entity::User,
        Entity::UserGoal,
        Entity::EcoActivity,
        Entity::Resource,
        Entity::Challenge,
        Entity::UserChallenge,
        Entity::Notification,
        Entity::FeedbackAndSupport,
    ];

    /// Wire name of the entity.
    pub fn name(&self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::UserGoal => "user_goal",
            Entity::EcoActivity => "eco_activity",
            Entity::Resource => "resource",
            Entity::Challenge => "challenge",
            Entity::UserChallenge => "user_challenge",
            Entity::Notification => "notification",
            Entity::FeedbackAndSupport => "feedback_and_support",
        }
    }

    /// Looks up an entity by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.name() == name)
    }
}

/// Serializes a freshly validated contract value back to JSON.
///
/// Contract types contain only JSON-representable data, so this cannot fail
/// in practice; a serializer error would surface as null.
fn normalized<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Validates a fully populated stored record for the given entity.
pub fn validate_record(entity: Entity, payload: &Value) -> ValidationResult<Value> {
    match entity {
        Entity::User => User::parse(payload).map(|v| normalized(&v)),
        Entity::UserGoal => UserGoal::parse(payload).map(|v| normalized(&v)),
        Entity::EcoActivity => EcoActivity::parse(payload).map(|v| normalized(&v)),
        Entity::Resource => Resource::parse(payload).map(|v| normalized(&v)),
        Entity::Challenge => Challenge::parse(payload).map(|v| normalized(&v)),
        Entity::UserChallenge => UserChallenge::parse(payload).map(|v| normalized(&v)),
        Entity::Notification => Notification::parse(payload).map(|v| normalized(&v)),
        Entity::FeedbackAndSupport => FeedbackAndSupport::parse(payload).map(|v| normalized(&v)),
    }
}

/// Validates a create-input payload for the given entity.
pub fn validate_create(entity: Entity, payload: &Value) -> ValidationResult<Value> {
    match entity {
        Entity::User => CreateUserInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserGoal => CreateUserGoalInput::parse(payload).map(|v| normalized(&v)),
        Entity::EcoActivity => CreateEcoActivityInput::parse(payload).map(|v| normalized(&v)),
        Entity::Resource => CreateResourceInput::parse(payload).map(|v| normalized(&v)),
        Entity::Challenge => CreateChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserChallenge => CreateUserChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::Notification => CreateNotificationInput::parse(payload).map(|v| normalized(&v)),
        Entity::FeedbackAndSupport => {
            CreateFeedbackAndSupportInput::parse(payload).map(|v| normalized(&v))
        }
    }
}

/// Validates an update-input payload for the given entity.
pub fn validate_update(entity: Entity, payload: &Value) -> ValidationResult<Value> {
    match entity {
        Entity::User => UpdateUserInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserGoal => UpdateUserGoalInput::parse(payload).map(|v| normalized(&v)),
        Entity::EcoActivity => UpdateEcoActivityInput::parse(payload).map(|v| normalized(&v)),
        Entity::Resource => UpdateResourceInput::parse(payload).map(|v| normalized(&v)),
        Entity::Challenge => UpdateChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserChallenge => UpdateUserChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::Notification => UpdateNotificationInput::parse(payload).map(|v| normalized(&v)),
        Entity::FeedbackAndSupport => {
            UpdateFeedbackAndSupportInput::parse(payload).map(|v| normalized(&v))
        }
    }
}

/// Validates a search-input payload for the given entity.
pub fn validate_search(entity: Entity, payload: &Value) -> ValidationResult<Value> {
    match entity {
        Entity::User => SearchUserInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserGoal => SearchUserGoalInput::parse(payload).map(|v| normalized(&v)),
        Entity::EcoActivity => SearchEcoActivityInput::parse(payload).map(|v| normalized(&v)),
        Entity::Resource => SearchResourceInput::parse(payload).map(|v| normalized(&v)),
        Entity::Challenge => SearchChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::UserChallenge => SearchUserChallengeInput::parse(payload).map(|v| normalized(&v)),
        Entity::Notification => SearchNotificationInput::parse(payload).map(|v| normalized(&v)),
        Entity::FeedbackAndSupport => {
            SearchFeedbackAndSupportInput::parse(payload).map(|v| normalized(&v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_names_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_name(entity.name()), Some(entity));
        }
        assert_eq!(Entity::from_name("unknown"), None);
    }

    #[test]
    fn test_dispatch_applies_create_defaults() {
        let out = validate_create(
            Entity::User,
            &json!({ "email": "a@example.com", "name": "A" }),
        )
        .unwrap();
        assert_eq!(out["eco_level"], 0.0);
    }

    #[test]
    fn test_dispatch_normalizes_record_dates() {
        let out = validate_record(
            Entity::EcoActivity,
            &json!({
                "activity_id": "a1",
                "user_id": "u1",
                "activity_name": "Planted a tree",
                "date_logged": "2024-04-22"
            }),
        )
        .unwrap();
        assert_eq!(out["date_logged"], "2024-04-22T00:00:00Z");
    }

    #[test]
    fn test_dispatch_search_defaults() {
        let out = validate_search(Entity::Notification, &json!({})).unwrap();
        assert_eq!(out["limit"], 10);
        assert_eq!(out["offset"], 0);
        assert_eq!(out["sort_by"], "created_at");
        assert_eq!(out["sort_order"], "desc");
    }

    #[test]
    fn test_dispatch_propagates_violations() {
        let err = validate_update(Entity::Resource, &json!({})).unwrap_err();
        assert!(err.has_field("resource_id"));
    }
}
