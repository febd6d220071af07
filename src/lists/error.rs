//! Validation errors raised by list operations.

use thiserror::Error;

/// Reasons a head/tail request is rejected.
///
/// The display strings are part of the public API: they are returned verbatim
/// in the `error` field of 400 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// An element of the input was not a string.
    #[error("'list' must be an array of strings")]
    NotStrings,

    /// The count was present but not an integer.
    #[error("'count' must be an integer")]
    NotInteger,

    /// The count was negative.
    #[error("'count' must be >= 0")]
    Negative,

    /// The count was larger than the number of items.
    #[error("'count' cannot exceed the length of 'list'")]
    ExceedsLength,
}

/// Result type for list operations.
pub type ListResult<T> = Result<T, ListError>;
