//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nav_resolutions_total` (counter): resolutions by menu and outcome
//! - `nav_resolution_duration_seconds` (histogram): resolver latency by menu
//! - `nav_requests_rejected_total` (counter): 4xx answers by reason
//! - `nav_menus_loaded` (gauge): menus in the active registry
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter binds its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one resolution. `matched` is whether any route ended up active.
pub fn record_resolution(menu: &str, matched: bool, start: Instant) {
    counter!(
        "nav_resolutions_total",
        "menu" => menu.to_string(),
        "matched" => matched.to_string()
    )
    .increment(1);
    histogram!("nav_resolution_duration_seconds", "menu" => menu.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rejected(reason: &'static str) {
    counter!("nav_requests_rejected_total", "reason" => reason).increment(1);
}

pub fn record_menus_loaded(count: usize) {
    gauge!("nav_menus_loaded").set(count as f64);
}
