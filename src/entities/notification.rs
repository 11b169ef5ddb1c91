//! Notification contracts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    pub user_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let notification_id = p.string("notification_id");
        let user_id = p.string("user_id");
        let message = p.string("message");
        let is_read = p.bool_or("is_read", false);
        let created_at = p.date("created_at");
        match (notification_id, user_id, message, is_read, created_at) {
            (Some(notification_id), Some(user_id), Some(message), Some(is_read), Some(created_at))
                if p.is_valid() =>
            {
                Ok(Self {
                    notification_id,
                    user_id,
                    message,
                    is_read,
                    created_at,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for pushing a new notification. `is_read` defaults to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNotificationInput {
    pub user_id: String,
    pub message: String,
    pub is_read: bool,
}

impl CreateNotificationInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_id = p.string("user_id");
        let message = p.nonempty_string("message");
        let is_read = p.bool_or("is_read", false);
        match (user_id, message, is_read) {
            (Some(user_id), Some(message), Some(is_read)) if p.is_valid() => Ok(Self {
                user_id,
                message,
                is_read,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `notification_id` (typically the read flag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNotificationInput {
    pub notification_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl UpdateNotificationInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let notification_id = p.string("notification_id");
        let user_id = p.opt_string("user_id");
        let message = p.opt_nonempty_string("message");
        let is_read = p.opt_bool("is_read");
        match notification_id {
            Some(notification_id) if p.is_valid() => Ok(Self {
                notification_id,
                user_id,
                message,
                is_read,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable notification columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSortKey {
    CreatedAt,
}

impl SortKey for NotificationSortKey {
    const ALLOWED: &'static [&'static str] = &["created_at"];

    fn default_key() -> Self {
        NotificationSortKey::CreatedAt
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(NotificationSortKey::CreatedAt),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NotificationSortKey::CreatedAt => "created_at",
        }
    }
}

pub type SearchNotificationInput = SearchInput<NotificationSortKey>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_is_read() {
        let input = CreateNotificationInput::parse(&json!({
            "user_id": "u1",
            "message": "Challenge starts tomorrow"
        }))
        .unwrap();
        assert!(!input.is_read);
    }

    #[test]
    fn test_create_empty_message_rejected() {
        let err = CreateNotificationInput::parse(&json!({
            "user_id": "u1",
            "message": ""
        }))
        .unwrap_err();
        assert!(err.has_field("message"));
    }

    #[test]
    fn test_update_read_flag() {
        let input = UpdateNotificationInput::parse(&json!({
            "notification_id": "n1",
            "is_read": true
        }))
        .unwrap();
        assert_eq!(input.is_read, Some(true));
    }

    #[test]
    fn test_record_parses_epoch_timestamp() {
        let n = Notification::parse(&json!({
            "notification_id": "n1",
            "user_id": "u1",
            "message": "Welcome!",
            "created_at": 1717200000000i64
        }))
        .unwrap();
        assert!(!n.is_read);
        assert_eq!(n.created_at.timestamp_millis(), 1_717_200_000_000);
    }
}
