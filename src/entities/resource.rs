//! Educational resource contracts
//!
//! `content` has a minimum length but no maximum; `read_count` is a nullable
//! counter defaulting to 0 when absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;
use crate::search::{SearchInput, SortKey};

/// A stored resource record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: String,
    pub category: String,
    pub title: String,
    pub content: String,
    pub read_count: Option<f64>,
}

impl Resource {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let resource_id = p.string("resource_id");
        let category = p.string("category");
        let title = p.string("title");
        let content = p.string("content");
        let read_count = p.nullable_number_or("read_count", 0.0);
        match (resource_id, category, title, content, read_count) {
            (Some(resource_id), Some(category), Some(title), Some(content), Some(read_count))
                if p.is_valid() =>
            {
                Ok(Self {
                    resource_id,
                    category,
                    title,
                    content,
                    read_count,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Payload for publishing a new resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResourceInput {
    pub category: String,
    pub title: String,
    pub content: String,
    pub read_count: Option<f64>,
}

impl CreateResourceInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let category = p.bounded_string("category", 1, 255);
        let title = p.bounded_string("title", 1, 255);
        let content = p.nonempty_string("content");
        let read_count = p.nullable_number_or("read_count", 0.0);
        match (category, title, content, read_count) {
            (Some(category), Some(title), Some(content), Some(read_count)) if p.is_valid() => {
                Ok(Self {
                    category,
                    title,
                    content,
                    read_count,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}

/// Partial update keyed by `resource_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResourceInput {
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::payload::double_option"
    )]
    pub read_count: Option<Option<f64>>,
}

impl UpdateResourceInput {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let resource_id = p.string("resource_id");
        let category = p.opt_bounded_string("category", 1, 255);
        let title = p.opt_bounded_string("title", 1, 255);
        let content = p.opt_nonempty_string("content");
        let read_count = p.opt_nullable_number("read_count");
        match resource_id {
            Some(resource_id) if p.is_valid() => Ok(Self {
                resource_id,
                category,
                title,
                content,
                read_count,
            }),
            _ => Err(p.into_error()),
        }
    }
}

/// Sortable resource columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSortKey {
    Title,
    Category,
}

impl SortKey for ResourceSortKey {
    const ALLOWED: &'static [&'static str] = &["title", "category"];

    fn default_key() -> Self {
        ResourceSortKey::Title
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(ResourceSortKey::Title),
            "category" => Some(ResourceSortKey::Category),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ResourceSortKey::Title => "title",
            ResourceSortKey::Category => "category",
        }
    }
}

pub type SearchResourceInput = SearchInput<ResourceSortKey>;
