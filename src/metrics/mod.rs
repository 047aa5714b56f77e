use axum::{routing::get, Router};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Installs the global Prometheus recorder. Must run before any
/// `metrics::` macro call is expected to count.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Installs the recorder and returns the router serving the
/// exposition endpoint.
pub fn setup_metrics() -> Result<Router, BuildError> {
    let handle = install_recorder()?;
    Ok(Router::new().route("/metrics", get(move || async move { handle.render() })))
}
