//! Request handling and normalization.
//!
//! # Responsibilities
//! - Name the request ID header and read it back for logging
//! - Parse the query-string and JSON-body input shapes
//! - Normalize both into a single [`ListInput`]
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parameters other than `list` and `count` are ignored
//! - JSON bodies are strict: unknown fields are rejected

use axum::http::{HeaderMap, HeaderName};
use serde::Deserialize;
use serde_json::Value;

use crate::lists::{count_from_value, items_from_values, ListError};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Count used when the client does not send one.
pub const DEFAULT_COUNT: i64 = 1;

/// The request ID set by the middleware stack, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Normalized input shared by every list route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInput {
    pub items: Vec<String>,
    pub count: i64,
}

/// Query-string shape: `?list=a,b,c&count=2`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub list: Option<String>,
    pub count: Option<String>,
}

impl ListQuery {
    /// Split the CSV list and parse the count.
    pub fn into_input(self) -> Result<ListInput, ListError> {
        let items = parse_csv_list(self.list.as_deref());
        let count = match self.count {
            Some(raw) => raw.trim().parse().map_err(|_| ListError::NotInteger)?,
            None => DEFAULT_COUNT,
        };
        Ok(ListInput { items, count })
    }
}

/// JSON body shape: `{"list": [...], "count": 2}`.
///
/// Fields stay untyped so that element and count type errors are reported
/// with the list engine's messages instead of the deserializer's.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListBody {
    pub list: Value,
    #[serde(default = "default_count_value")]
    pub count: Value,
}

fn default_count_value() -> Value {
    Value::from(DEFAULT_COUNT)
}

impl ListBody {
    /// Check element and count types.
    pub fn into_input(self) -> Result<ListInput, ListError> {
        let items = items_from_values(self.list)?;
        let count = count_from_value(&self.count)?;
        Ok(ListInput { items, count })
    }
}

/// Split a comma-separated list, trimming segments and dropping empty ones.
pub fn parse_csv_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
