//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echobin_requests_total` (counter): total requests by method, path, status
//! - `echobin_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Labels for method, path and status code
//! - The exporter runs on its own scrape address, separate from the
//!   service listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given scrape address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(e) = builder.install() {
        tracing::error!(error = %e, "Failed to install metrics exporter");
        return;
    }

    describe_counter!(
        "echobin_requests_total",
        "Total requests served, by method, path and status"
    );
    describe_histogram!(
        "echobin_request_duration_seconds",
        "Request latency distribution in seconds"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, path: &str, start: Instant) {
    counter!(
        "echobin_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "echobin_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
