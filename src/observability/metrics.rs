//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hub_requests_total` (counter): dispatched requests by method, status,
//!   matched alias (`none` when nothing matched)
//! - `hub_request_duration_seconds` (histogram): dispatch latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "hub_requests_total",
                "Dispatched requests by method, status and alias"
            );
            describe_histogram!(
                "hub_request_duration_seconds",
                "Dispatch latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter started");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }
}

/// Record one dispatch outcome.
pub fn record_dispatch(method: &str, status: u16, alias: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("alias", alias.to_string()),
    ];
    counter!("hub_requests_total", &labels).increment(1);
    histogram!("hub_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
