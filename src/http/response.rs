//! Response construction.
//!
//! # Responsibilities
//! - Map operation outcomes to `{"result": ...}` / `{"error": ...}` payloads
//! - Map errors to HTTP status codes
//! - Attach `Cache-Control` and `ETag` headers
//!
//! # Design Decisions
//! - The ETag is computed over the exact bytes sent to the client
//! - Transport errors and validation errors share one `{"error": ...}` shape
//! - A matching `If-None-Match` on a cacheable success yields 304

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::http::cache::{check_etag_match, CacheDirectives, CachePolicy, Cacheability};
use crate::lists::ListError;

/// Body of every list response: exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    Result(Vec<String>),
    Error(String),
}

/// Errors surfaced to clients as `{"error": ...}` responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected by the list engine.
    #[error(transparent)]
    Validation(#[from] ListError),

    /// Malformed transport input (bad JSON, unknown fields, bad query).
    #[error("{0}")]
    BadRequest(String),

    /// Body exceeded the configured size limit while being read.
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// A fully decided list response, ready to be rendered.
#[derive(Debug)]
pub struct ListResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub cache: CacheDirectives,
    pub not_modified: bool,
}

impl ListResponse {
    /// Build the response for an operation outcome.
    ///
    /// `if_none_match` is the raw request header, if any.
    pub fn build(
        outcome: Result<Vec<String>, ApiError>,
        route: Cacheability,
        policy: &CachePolicy,
        if_none_match: Option<&str>,
    ) -> Result<Self, serde_json::Error> {
        let (status, payload) = match outcome {
            Ok(result) => (StatusCode::OK, ResponsePayload::Result(result)),
            Err(e) => (e.status(), ResponsePayload::Error(e.to_string())),
        };

        let body = serde_json::to_vec(&payload)?;
        let cache = policy.directives(route, status, &body);
        let not_modified = cache
            .etag
            .as_deref()
            .is_some_and(|etag| check_etag_match(if_none_match, etag));

        Ok(Self {
            status,
            body,
            cache,
            not_modified,
        })
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        let mut response = if self.not_modified {
            StatusCode::NOT_MODIFIED.into_response()
        } else {
            let mut response = (self.status, self.body).into_response();
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        };

        let headers = response.headers_mut();
        match HeaderValue::from_str(&self.cache.cache_control) {
            Ok(value) => {
                headers.insert(header::CACHE_CONTROL, value);
            }
            Err(_) => {
                headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            }
        }
        if let Some(etag) = self.cache.etag.as_deref().and_then(|e| HeaderValue::from_str(e).ok()) {
            headers.insert(header::ETAG, etag);
        }
        response
    }
}
