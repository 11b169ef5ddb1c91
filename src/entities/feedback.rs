//! Feedback and support contracts
//!
//! `screenshot_urls` is an opaque blob like goal milestones: any JSON,
//! absent normalizes to null, never shape-checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored feedback ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAndSupport {
    pub feedback_id: String,
    pub user_id: String,
    pub subject: String,
    pub details: String,
    #[serde(default)]
    pub screenshot_urls: Value,
}

impl FeedbackAndSupport {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let feedback_id = p.string("feedback_id");
        let user_id = p.string("user_id");
        let subject = p.string("subject");
        let details = p.string("details");
        let screenshot_urls = p.any_nullable("screenshot_urls");
        match (feedback_id, user_id, subject, details) {
            (Some(feedback_id), Some(user_id), Some(subject), Some(details)) if p.is_valid() => {
                Ok(Self {
                    feedback_id,
                    user_id,
                    subject,
                    details,
                    screenshot_urls,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for filing a new ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFeedbackAndSupportInput {
    pub user_id: String,
    pub subject: String,
    pub details: String,
    #[serde(default)]
    pub screenshot_urls: Value,
}

impl CreateFeedbackAndSupportInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let user_id = p.string("user_id");
        let subject = p.bounded_string("subject", 1, 255);
        let details = p.nonempty_string("details");
        let screenshot_urls = p.any_nullable("screenshot_urls");
        match (user_id, subject, details) {
            (Some(user_id), Some(subject), Some(details)) if p.is_valid() => Ok(Self {
                user_id,
                subject,
                details,
                screenshot_urls,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `feedback_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFeedbackAndSupportInput {
    pub feedback_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::present_any"
    )]
    pub screenshot_urls: Option<Value>,
}

impl UpdateFeedbackAndSupportInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let feedback_id = p.string("feedback_id");
        let user_id = p.opt_string("user_id");
        let subject = p.opt_bounded_string("subject", 1, 255);
        let details = p.opt_nonempty_string("details");
        let screenshot_urls = p.opt_any("screenshot_urls");
        match feedback_id {
            Some(feedback_id) if p.is_valid() => Ok(Self {
                feedback_id,
                user_id,
                subject,
                details,
                screenshot_urls,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable ticket columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSortKey {
    Subject,
}

impl SortKey for FeedbackSortKey {
    const ALLOWED: &'static [&'static str] = &["subject"];

    fn default_key() -> Self {
        FeedbackSortKey::Subject
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "subject" => Some(FeedbackSortKey::Subject),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FeedbackSortKey::Subject => "subject",
        }
    }
}

pub type SearchFeedbackAndSupportInput = SearchInput<FeedbackSortKey>;
