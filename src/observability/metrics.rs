//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Record how many version groups were mounted and what each serves
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `versioning_mounted_versions` (gauge): mounted version groups, latest alias included
//! - `versioning_endpoints_mounted_total` (counter): endpoints mounted, by prefix
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so library users
//!   who never call `init_metrics` pay nothing

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_mounted_versions(count: usize) {
    metrics::gauge!("versioning_mounted_versions").set(count as f64);
}

pub fn record_mount(prefix: &str, endpoints: usize) {
    metrics::counter!("versioning_endpoints_mounted_total", "prefix" => prefix.to_string())
        .increment(endpoints as u64);
}
