//! List operation subsystem.
//!
//! # Data Flow
//! ```text
//! normalized (items, count)
//!     → engine.rs (validate bounds, slice)
//!     → Ok(result) | Err(ListError)
//! ```
//!
//! # Design Decisions
//! - Operations are pure functions over borrowed slices
//! - Error messages are stable and surfaced to clients unchanged
//! - `tail` with a zero count is empty, never the whole list

pub mod engine;
pub mod error;

pub use engine::{count_from_value, head, items_from_values, tail, validate, Operation};
pub use error::{ListError, ListResult};
