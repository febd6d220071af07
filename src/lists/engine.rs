//! Head and tail over a sequence of strings.
//!
//! Everything here is pure: no I/O, no shared state. Callers hand in a
//! borrowed slice and get back an owned copy of the selected window.

use serde_json::Value;

use crate::lists::error::{ListError, ListResult};

/// Which end of the sequence an operation reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// First `count` elements.
    Head,
    /// Last `count` elements.
    Tail,
}

impl Operation {
    /// Stable lowercase name, used for logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Head => "head",
            Operation::Tail => "tail",
        }
    }

    /// Run this operation against `items`.
    pub fn apply(self, items: &[String], count: i64) -> ListResult<Vec<String>> {
        match self {
            Operation::Head => head(items, count),
            Operation::Tail => tail(items, count),
        }
    }
}

/// Check `count` against the bounds of `items`.
///
/// Returns the count as a `usize` so callers can slice without a second
/// conversion.
pub fn validate(items: &[String], count: i64) -> ListResult<usize> {
    if count < 0 {
        return Err(ListError::Negative);
    }
    let count = usize::try_from(count).map_err(|_| ListError::ExceedsLength)?;
    if count > items.len() {
        return Err(ListError::ExceedsLength);
    }
    Ok(count)
}

/// Return the first `count` elements of `items`.
pub fn head(items: &[String], count: i64) -> ListResult<Vec<String>> {
    let count = validate(items, count)?;
    Ok(items[..count].to_vec())
}

/// Return the last `count` elements of `items`.
///
/// `tail(items, 0)` is always empty.
pub fn tail(items: &[String], count: i64) -> ListResult<Vec<String>> {
    let count = validate(items, count)?;
    Ok(items[items.len() - count..].to_vec())
}

/// Coerce an untyped JSON value into a sequence of strings.
///
/// Anything other than an array whose elements are all strings is rejected.
pub fn items_from_values(value: Value) -> ListResult<Vec<String>> {
    let Value::Array(values) = value else {
        return Err(ListError::NotStrings);
    };
    values
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            _ => Err(ListError::NotStrings),
        })
        .collect()
}

/// Coerce an untyped JSON count into an integer.
///
/// Floats with no fractional part (`2.0`) are rejected like any other
/// non-integer.
pub fn count_from_value(value: &Value) -> ListResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .ok_or(ListError::NotInteger),
        _ => Err(ListError::NotInteger),
    }
}
