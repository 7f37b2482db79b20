//! Metrics collection and exposition.
//!
//! # Metrics
//! - `adapter_invocations_total` (counter): invocations by outcome
//! - `adapter_invocation_duration_seconds` (histogram): end-to-end latency
//! - `adapter_compressed_bytes` (histogram): gzip payload size
//! - `adapter_offloads_total` (counter): blob uploads by result
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_invocation(outcome: &'static str, start: Instant) {
    counter!("adapter_invocations_total", "outcome" => outcome).increment(1);
    histogram!("adapter_invocation_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_compressed_size(bytes: usize) {
    histogram!("adapter_compressed_bytes").record(bytes as f64);
}

pub fn record_offload(success: bool) {
    let result = if success { "ok" } else { "failed" };
    counter!("adapter_offloads_total", "result" => result).increment(1);
}
