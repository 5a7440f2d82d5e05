//! Catalog fetch metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! binary installs the Prometheus recorder with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};

pub const FETCH_TOTAL: &str = "mind_catalog_fetch_total";
pub const FETCH_ERRORS_TOTAL: &str = "mind_catalog_fetch_errors_total";
pub const STALE_RESULTS_TOTAL: &str = "mind_catalog_stale_results_total";
pub const FETCH_DURATION_SECONDS: &str = "mind_catalog_fetch_duration_seconds";
pub const MODELS_GAUGE: &str = "mind_catalog_models";

pub fn init_metrics() {
    let port: u16 = std::env::var("MIND_CATALOG_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9898);
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
}

/// Records the elapsed fetch time into the duration histogram when dropped,
/// labelled with how the fetch ended.
pub struct FetchTimer {
    start: Instant,
    outcome: &'static str,
}

impl FetchTimer {
    pub fn start() -> Self {
        ::metrics::counter!(FETCH_TOTAL).increment(1);
        Self {
            start: Instant::now(),
            outcome: "abandoned",
        }
    }

    pub fn success(mut self, models: usize) {
        ::metrics::gauge!(MODELS_GAUGE).set(models as f64);
        self.outcome = "success";
    }

    pub fn failure(mut self) {
        ::metrics::counter!(FETCH_ERRORS_TOTAL).increment(1);
        self.outcome = "error";
    }

    pub fn stale(mut self) {
        ::metrics::counter!(STALE_RESULTS_TOTAL).increment(1);
        self.outcome = "stale";
    }
}

impl Drop for FetchTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        ::metrics::histogram!(FETCH_DURATION_SECONDS, "outcome" => self.outcome).record(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_without_recorder_is_noop() {
        FetchTimer::start().success(3);
        FetchTimer::start().failure();
        FetchTimer::start().stale();
        let _abandoned = FetchTimer::start();
    }
}
