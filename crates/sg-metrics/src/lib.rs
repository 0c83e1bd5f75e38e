use std::env;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize a Prometheus exporter listening on `0.0.0.0:<port>`.
///
/// The port is resolved from the provided environment variable name or the
/// supplied `default_port`. Returns a handle to the exporter if it was started.
pub fn init_metrics(port_env: &str, default_port: u16) -> Option<&'static PrometheusHandle> {
    let port = env::var(port_env)
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(default_port);

    if let Some(existing) = PROMETHEUS_HANDLE.get() {
        return Some(existing);
    }

    match PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install_recorder()
    {
        Ok(handle) => {
            let _ = PROMETHEUS_HANDLE.set(handle);
            info!(metrics_port = port, "started prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to start prometheus exporter");
            PROMETHEUS_HANDLE.get()
        }
    }
}

/// Record the row count published to one output table in this run.
pub fn record_published_rows(table: &'static str, rows: usize) {
    metrics::gauge!("sg_published_rows", "table" => table).set(rows as f64);
    metrics::counter!("sg_published_rows_total", "table" => table).increment(rows as u64);
}

/// Mark a run as finished, successfully or not.
pub fn record_run_outcome(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("sg_runs_total", "outcome" => outcome).increment(1);
}
