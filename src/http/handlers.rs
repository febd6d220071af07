//! Route handlers.
//!
//! GET and POST variants differ only in how input is read and whether the
//! response may be cached; both funnel into [`dispatch`].

use std::time::Instant;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::cache::{Cacheability, NO_STORE};
use crate::http::request::{request_id, ListBody, ListInput, ListQuery};
use crate::http::response::{ApiError, ListResponse};
use crate::http::server::AppState;
use crate::lists::Operation;
use crate::observability::metrics;

pub async fn get_head(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    dispatch(&state, Operation::Head, Cacheability::Cacheable, &headers, from_query(query))
}

pub async fn get_tail(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    dispatch(&state, Operation::Tail, Cacheability::Cacheable, &headers, from_query(query))
}

pub async fn post_head(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ListBody>, JsonRejection>,
) -> Response {
    dispatch(&state, Operation::Head, Cacheability::NoStore, &headers, from_body(body))
}

pub async fn post_tail(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ListBody>, JsonRejection>,
) -> Response {
    dispatch(&state, Operation::Tail, Cacheability::NoStore, &headers, from_body(body))
}

/// Unversioned liveness endpoint.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, NO_STORE)],
        Json(json!({
            "status": "ok",
            "name": state.config.app_name,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

fn from_query(query: Result<Query<ListQuery>, QueryRejection>) -> Result<ListInput, ApiError> {
    let Query(query) = query?;
    Ok(query.into_input()?)
}

fn from_body(body: Result<Json<ListBody>, JsonRejection>) -> Result<ListInput, ApiError> {
    let Json(body) = body?;
    Ok(body.into_input()?)
}

/// Run `operation` on normalized input and render the response.
fn dispatch(
    state: &AppState,
    operation: Operation,
    route: Cacheability,
    headers: &HeaderMap,
    input: Result<ListInput, ApiError>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(headers);
    let method = match route {
        Cacheability::Cacheable => "GET",
        Cacheability::NoStore => "POST",
    };

    let outcome = input.and_then(|input| Ok(operation.apply(&input.items, input.count)?));
    if let Err(e) = &outcome {
        tracing::debug!(
            request_id = %request_id,
            operation = operation.as_str(),
            method,
            error = %e,
            "Rejected list request"
        );
    }

    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok());

    let response = match ListResponse::build(outcome, route, &state.cache_policy, if_none_match) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                operation = operation.as_str(),
                error = %e,
                "Failed to serialize response"
            );
            metrics::record_request(operation.as_str(), method, 500, start);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let status = if response.not_modified {
        StatusCode::NOT_MODIFIED
    } else {
        response.status
    };
    metrics::record_request(operation.as_str(), method, status.as_u16(), start);

    response.into_response()
}
