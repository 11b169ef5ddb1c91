//! Shared search-input contract
//!
//! Every entity accepts the same search shape: an optional free-text
//! `query`, pagination (`limit` > 0, `offset` >= 0), a per-entity `sort_by`
//! allow-list, and `sort_order`. Only the sort-key enum differs per entity,
//! so the contract is generic over it.
//!
//! Defaults: `limit` 10, `offset` 0, `sort_order` desc, `sort_by` the
//! entity's declared default column.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationResult;
use crate::payload::Payload;

/// Sortable-column enum for one entity.
///
/// `ALLOWED`, `from_name`, and `name` must agree: every name in `ALLOWED`
/// round-trips through `from_name`.
pub trait SortKey: Copy {
    /// Allow-list of sortable column names.
    const ALLOWED: &'static [&'static str];

    /// Column used when the payload does not name one.
    fn default_key() -> Self;

    /// Looks up a column by its wire name.
    fn from_name(name: &str) -> Option<Self>;

    /// Wire name of this column.
    fn name(&self) -> &'static str;
}

/// Sort direction, defaulting to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALLOWED: &'static [&'static str] = &["asc", "desc"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Search input for one entity, generic over its sort-key enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInput<K> {
    /// Free-text query, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub limit: i64,
    pub offset: i64,
    pub sort_by: K,
    pub sort_order: SortOrder,
}

impl<K: SortKey> SearchInput<K> {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const DEFAULT_OFFSET: i64 = 0;

    /// Parses a search payload, applying defaults for absent fields.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut p = Payload::new(value)?;
        let query = p.opt_string("query");
        let limit = p.positive_int_or("limit", Self::DEFAULT_LIMIT);
        let offset = p.nonnegative_int_or("offset", Self::DEFAULT_OFFSET);
        let sort_by = p
            .keyword_or("sort_by", K::ALLOWED, K::default_key().name())
            .and_then(|name| K::from_name(&name));
        let sort_order = p
            .keyword_or("sort_order", SortOrder::ALLOWED, SortOrder::Desc.name())
            .and_then(|name| SortOrder::from_name(&name));

        match (limit, offset, sort_by, sort_order) {
            (Some(limit), Some(offset), Some(sort_by), Some(sort_order)) if p.is_valid() => {
                Ok(Self {
                    query,
                    limit,
                    offset,
                    sort_by,
                    sort_order,
                })
            }
            _ => Err(p.into_error()),
        }
    }
}
