//! Metrics collection and exposition.
//!
//! # Metrics
//! - `poolshare_pools_created_total` (counter): pools opened and published
//! - `poolshare_pool_failures_total` (counter): failures by stage
//!   (config, open, probe, duplicate, close)
//! - `poolshare_pools_closed_total` (counter): pools closed cleanly
//! - `poolshare_active_pools` (gauge): pools in the active registry, set
//!   when a registry is published or taken down
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_pool_created() {
    metrics::counter!("poolshare_pools_created_total").increment(1);
}

pub fn record_pool_failure(stage: &'static str) {
    metrics::counter!("poolshare_pool_failures_total", "stage" => stage).increment(1);
}

pub fn record_pool_closed() {
    metrics::counter!("poolshare_pools_closed_total").increment(1);
}

pub fn record_active_pools(count: usize) {
    metrics::gauge!("poolshare_active_pools").set(count as f64);
}
