//! List Service Library
//!
//! Head/tail operations over string lists, served over HTTP with a
//! cache-header policy for GET routes.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lists;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
