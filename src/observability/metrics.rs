//! Metrics collection and exposition.
//!
//! # Metrics
//! - `list_requests_total` (counter): requests by operation, method, status
//! - `list_request_duration_seconds` (histogram): handler latency
//!
//! # Design Decisions
//! - Exporter is opt-in; recording without one installed is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed list request.
pub fn record_request(operation: &'static str, method: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "list_requests_total",
        "operation" => operation,
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "list_request_duration_seconds",
        "operation" => operation,
        "method" => method
    )
    .record(start.elapsed().as_secs_f64());
}
