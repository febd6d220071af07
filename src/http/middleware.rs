//! Tower middleware stack applied to every route.
//!
//! **Ordering (outermost to innermost):**
//! 1. `SetRequestId` -- assigns a UUID v4 `x-request-id` when absent
//! 2. `Trace` -- request/response spans carrying `request_id`
//! 3. `RequestBodyLimit` -- rejects oversized POST bodies; `DefaultBodyLimit`
//!    lifts axum's own 2MB extractor cap to the same configured limit
//! 4. `CORS` -- configured origins, GET/POST/OPTIONS
//! 5. `Timeout` -- total request processing budget
//! 6. `PropagateRequestId` -- copies `x-request-id` onto the response

use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::request::{request_id, X_REQUEST_ID};

/// Wrap `router` in the HTTP middleware stack.
pub fn apply_http_layers(router: Router, config: &ServiceConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(build_cors_layer(&config.cors.allow_origins))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.listener.request_timeout_secs),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
    )
}

/// Span for one request; events logged while handling it inherit `request_id`.
fn make_request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}

/// A wildcard `"*"` allows any origin; otherwise each entry that parses as
/// a header value joins an explicit allowlist.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_request_span_carries_request_id() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let request = Request::get("/v1/lists/head?list=a")
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        tracing::subscriber::with_default(subscriber, || {
            let span = make_request_span(&request);
            let _entered = span.enter();
            tracing::info!("handled");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("request_id=abc-123"), "{output}");
        assert!(output.contains("handled"), "{output}");
    }
}
