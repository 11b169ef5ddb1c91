//! Contract Invariant Tests
//!
//! Cross-entity invariants for the validation contracts:
//! - Validation is deterministic and side-effect free
//! - Declared defaults apply when a field is absent
//! - Update inputs accept identifier-only payloads
//! - Search bounds and sort allow-lists are enforced everywhere
//! - Record contracts are idempotent under serialize-then-revalidate
//! - Every offending field is reported, not just the first

use ecoval::{
    validate_create, validate_record, validate_search, validate_update, Challenge,
    CreateUserGoalInput, EcoActivity, Entity, FeedbackAndSupport, Notification, Resource, Rule,
    SearchChallengeInput, User, UserChallenge, UserGoal,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// A well-formed stored record for each entity.
fn sample_record(entity: Entity) -> Value {
    match entity {
        Entity::User => json!({
            "id": "u1",
            "email": "alice@example.com",
            "name": "Alice",
            "eco_level": 4,
            "created_at": "2024-01-15T09:00:00Z"
        }),
        Entity::UserGoal => json!({
            "goal_id": "g1",
            "user_id": "u1",
            "title": "Recycle more",
            "description": "Weekly glass run",
            "milestones": { "weeks": [1, 2, 3] },
            "completion_status": false,
            "last_updated": "2024-02-01T00:00:00Z"
        }),
        Entity::EcoActivity => json!({
            "activity_id": "a1",
            "user_id": "u1",
            "activity_name": "Biked to work",
            "date_logged": "2024-05-01T07:45:00Z"
        }),
        Entity::Resource => json!({
            "resource_id": "r1",
            "category": "energy",
            "title": "LED switch",
            "content": "Swap the bulbs.",
            "read_count": 12
        }),
        Entity::Challenge => json!({
            "challenge_id": "c1",
            "title": "No-car week",
            "description": null,
            "start_date": "2024-06-01T00:00:00Z",
            "end_date": "2024-06-08T00:00:00Z"
        }),
        Entity::UserChallenge => json!({
            "user_challenge_id": "uc1",
            "user_id": "u1",
            "challenge_id": "c1",
            "progress": 40
        }),
        Entity::Notification => json!({
            "notification_id": "n1",
            "user_id": "u1",
            "message": "Challenge starts tomorrow",
            "is_read": true,
            "created_at": "2024-05-31T18:00:00Z"
        }),
        Entity::FeedbackAndSupport => json!({
            "feedback_id": "f1",
            "user_id": "u1",
            "subject": "Broken chart",
            "details": "The eco-level chart renders blank.",
            "screenshot_urls": ["https://cdn.example.com/shot1.png"]
        }),
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// The same payload validates the same way every time, for every entity.
#[test]
fn test_record_validation_is_deterministic() {
    for entity in Entity::ALL {
        let record = sample_record(entity);
        let first = validate_record(entity, &record).unwrap();
        for _ in 0..100 {
            assert_eq!(validate_record(entity, &record).unwrap(), first);
        }
    }
}

/// An invalid payload fails consistently with the same violations.
#[test]
fn test_invalid_payload_fails_consistently() {
    let payload = json!({ "email": "not-an-email" });
    let first = validate_create(Entity::User, &payload).unwrap_err();
    for _ in 0..100 {
        assert_eq!(validate_create(Entity::User, &payload).unwrap_err(), first);
    }
}

// =============================================================================
// Default Application Tests
// =============================================================================

/// Omitted fields with declared defaults come back filled in.
#[test]
fn test_create_defaults() {
    let user = validate_create(
        Entity::User,
        &json!({ "email": "a@example.com", "name": "A" }),
    )
    .unwrap();
    assert_eq!(user["eco_level"], 0.0);

    let resource = validate_create(
        Entity::Resource,
        &json!({ "category": "waste", "title": "Composting", "content": "Start small." }),
    )
    .unwrap();
    assert_eq!(resource["read_count"], 0.0);

    let notification = validate_create(
        Entity::Notification,
        &json!({ "user_id": "u1", "message": "hi" }),
    )
    .unwrap();
    assert_eq!(notification["is_read"], false);
}

/// The worked goal-creation example: null description and milestones are
/// accepted and completion_status defaults to false.
#[test]
fn test_create_user_goal_example() {
    let input = CreateUserGoalInput::parse(&json!({
        "user_id": "u1",
        "title": "Recycle more",
        "description": null,
        "milestones": null
    }))
    .unwrap();
    assert_eq!(input.user_id, "u1");
    assert_eq!(input.description, None);
    assert_eq!(input.milestones, Value::Null);
    assert!(!input.completion_status);
}

/// Explicit null on a defaulted nullable field stays null.
#[test]
fn test_explicit_null_beats_default() {
    let user = validate_create(
        Entity::User,
        &json!({ "email": "a@example.com", "name": "A", "eco_level": null }),
    )
    .unwrap();
    assert_eq!(user["eco_level"], Value::Null);
}

// =============================================================================
// Update Input Tests
// =============================================================================

/// Identifier-only payloads are valid updates for every entity.
#[test]
fn test_update_with_identifier_only() {
    let cases = [
        (Entity::User, json!({ "id": "u1" })),
        (Entity::UserGoal, json!({ "goal_id": "g1" })),
        (Entity::EcoActivity, json!({ "activity_id": "a1" })),
        (Entity::Resource, json!({ "resource_id": "r1" })),
        (Entity::Challenge, json!({ "challenge_id": "c1" })),
        (Entity::UserChallenge, json!({ "user_challenge_id": "uc1" })),
        (Entity::Notification, json!({ "notification_id": "n1" })),
        (Entity::FeedbackAndSupport, json!({ "feedback_id": "f1" })),
    ];
    for (entity, payload) in cases {
        assert!(
            validate_update(entity, &payload).is_ok(),
            "identifier-only update failed for {}",
            entity.name()
        );
    }
}

/// A missing identifier fails the update for every entity.
#[test]
fn test_update_without_identifier_fails() {
    for entity in Entity::ALL {
        assert!(validate_update(entity, &json!({})).is_err());
    }
}

/// Present fields in an update must still satisfy their own constraints.
#[test]
fn test_update_present_fields_checked() {
    let err = validate_update(Entity::User, &json!({ "id": "u1", "email": "nope" })).unwrap_err();
    assert_eq!(err.violations[0].rule, Rule::InvalidFormat);
}

// =============================================================================
// Search Input Tests
// =============================================================================

/// Empty search payloads get the documented defaults everywhere.
#[test]
fn test_search_defaults_for_all_entities() {
    for entity in Entity::ALL {
        let out = validate_search(entity, &json!({})).unwrap();
        assert_eq!(out["limit"], 10, "limit default for {}", entity.name());
        assert_eq!(out["offset"], 0, "offset default for {}", entity.name());
        assert_eq!(out["sort_order"], "desc");
    }
}

/// Pagination bounds hold for every entity.
#[test]
fn test_search_pagination_bounds_for_all_entities() {
    for entity in Entity::ALL {
        assert!(validate_search(entity, &json!({ "limit": 0 })).is_err());
        assert!(validate_search(entity, &json!({ "limit": -3 })).is_err());
        assert!(validate_search(entity, &json!({ "offset": -1 })).is_err());
    }
}

/// The worked challenge-search example: "popularity" is not a sortable
/// challenge column.
#[test]
fn test_search_challenge_popularity_rejected() {
    let err = SearchChallengeInput::parse(&json!({ "sort_by": "popularity" })).unwrap_err();
    assert_eq!(err.violations[0].rule, Rule::NotInEnum);
    assert!(err.violations[0].message.contains("title"));
    assert!(err.violations[0].message.contains("start_date"));
}

/// Sort keys from another entity's allow-list do not leak across entities.
#[test]
fn test_sort_keys_do_not_leak_across_entities() {
    assert!(validate_search(Entity::User, &json!({ "sort_by": "progress" })).is_err());
    assert!(validate_search(Entity::UserChallenge, &json!({ "sort_by": "name" })).is_err());
}

// =============================================================================
// Round-Trip Idempotence Tests
// =============================================================================

/// A record produced by a contract, serialized and re-validated, is equal.
#[test]
fn test_record_round_trip_all_entities() {
    for entity in Entity::ALL {
        let normalized = validate_record(entity, &sample_record(entity)).unwrap();
        let again = validate_record(entity, &normalized).unwrap();
        assert_eq!(normalized, again, "round trip for {}", entity.name());
    }
}

/// Typed round trip for a record with nullable fields populated by defaults.
#[test]
fn test_typed_round_trip_with_defaults() {
    let goal = UserGoal::parse(&json!({
        "goal_id": "g1",
        "user_id": "u1",
        "title": "Zero waste",
        "description": null,
        "last_updated": null
    }))
    .unwrap();
    let serialized = serde_json::to_value(&goal).unwrap();
    assert_eq!(UserGoal::parse(&serialized).unwrap(), goal);
}

/// Record values keep their types through validation.
#[test]
fn test_record_values_unchanged() {
    let user = User::parse(&sample_record(Entity::User)).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.eco_level, Some(4.0));

    let activity = EcoActivity::parse(&sample_record(Entity::EcoActivity)).unwrap();
    assert_eq!(activity.activity_name, "Biked to work");

    let resource = Resource::parse(&sample_record(Entity::Resource)).unwrap();
    assert_eq!(resource.read_count, Some(12.0));

    let challenge = Challenge::parse(&sample_record(Entity::Challenge)).unwrap();
    assert_eq!(challenge.description, None);

    let enrollment = UserChallenge::parse(&sample_record(Entity::UserChallenge)).unwrap();
    assert_eq!(enrollment.progress, Some(40.0));

    let notification = Notification::parse(&sample_record(Entity::Notification)).unwrap();
    assert!(notification.is_read);

    let feedback = FeedbackAndSupport::parse(&sample_record(Entity::FeedbackAndSupport)).unwrap();
    assert_eq!(
        feedback.screenshot_urls,
        json!(["https://cdn.example.com/shot1.png"])
    );
}

// =============================================================================
// Error Reporting Tests
// =============================================================================

/// Every offending field shows up in a single report.
#[test]
fn test_all_violations_reported_together() {
    let err = validate_create(
        Entity::User,
        &json!({ "email": "bad", "name": "", "eco_level": "high" }),
    )
    .unwrap_err();
    assert_eq!(err.violations.len(), 3);
    assert!(err.has_field("email"));
    assert!(err.has_field("name"));
    assert!(err.has_field("eco_level"));
}

/// Non-object payloads fail with a `$root` violation for every contract.
#[test]
fn test_non_object_payload_rejected() {
    for entity in Entity::ALL {
        let err = validate_create(entity, &json!("not an object")).unwrap_err();
        assert!(err.has_field("$root"));
    }
}

/// Unknown keys are ignored, matching the stored contract's behavior.
#[test]
fn test_unknown_keys_ignored() {
    let mut record = sample_record(Entity::User);
    record["favorite_color"] = json!("green");
    assert!(validate_record(Entity::User, &record).is_ok());
}
