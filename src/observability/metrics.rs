//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define manager metrics (operation counts, latency, managed sites)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `sites_operations_total` (counter): operations by name and outcome
//! - `sites_operation_duration_seconds` (histogram): operation latency
//! - `sites_managed` (gauge): configurations currently stored
//!
//! # Design Decisions
//! - Metric updates are cheap enough to sit inside the coordinator
//! - Labels carry the operation name and outcome, never the site name
//!   (unbounded label cardinality)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr` and register metric metadata.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(e) = builder.install() {
        tracing::error!(error = %e, "Failed to install metrics exporter");
        return;
    }

    describe_counter!(
        "sites_operations_total",
        "Lifecycle operations by operation and outcome"
    );
    describe_histogram!(
        "sites_operation_duration_seconds",
        "Wall-clock duration of lifecycle operations"
    );
    describe_gauge!("sites_managed", "Site configurations currently stored");

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record one completed lifecycle operation.
pub fn record_operation(operation: &'static str, success: bool, start: Instant) {
    let outcome = if success { "success" } else { "failure" };
    counter!("sites_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("sites_operation_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored configurations.
pub fn record_site_count(count: usize) {
    gauge!("sites_managed").set(count as f64);
}
