//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware.rs layers)
//!     → handlers.rs (route → operation + cacheability)
//!     → request.rs (query CSV or JSON body → ListInput)
//!     → lists engine (validate, slice)
//!     → response.rs (payload, status)
//!     → cache.rs (Cache-Control, ETag, If-None-Match)
//!     → Send to client
//! ```

pub mod cache;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use cache::{CachePolicy, Cacheability};
pub use request::{ListInput, X_REQUEST_ID};
pub use response::{ApiError, ResponsePayload};
pub use server::{AppState, HttpServer};
