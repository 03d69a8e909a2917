//! Request metrics backed by the `metrics` facade and a Prometheus exporter.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::application::middleware::RequestMetrics;
use crate::domain::LinkError;

const REQUEST_COUNT: &str = "link_request_count";
const REQUEST_DURATION: &str = "link_request_duration_seconds";
const REQUEST_ERRORS: &str = "link_request_errors";

/// Forwards request observations to whichever `metrics` recorder is installed.
///
/// - `link_request_count{method}` - counter
/// - `link_request_duration_seconds{method}` - histogram
/// - `link_request_errors{method,kind}` - counter
///
/// Descriptions are registered by [`install_prometheus_recorder`], so this type
/// can be built before or after the recorder exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeRequestMetrics;

impl FacadeRequestMetrics {
    pub fn new() -> Self {
        Self
    }
}

/// Registers help text and units with the current recorder.
fn describe_request_metrics() {
    describe_counter!(REQUEST_COUNT, "total count of requests per service method");
    describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "duration of requests per service method"
    );
    describe_counter!(REQUEST_ERRORS, "failed requests per service method and error kind");
}

impl RequestMetrics for FacadeRequestMetrics {
    fn record(&self, method: &'static str, elapsed: Duration, error: Option<&LinkError>) {
        counter!(REQUEST_COUNT, "method" => method).increment(1);
        histogram!(REQUEST_DURATION, "method" => method).record(elapsed.as_secs_f64());
        if let Some(e) = error {
            counter!(REQUEST_ERRORS, "method" => method, "kind" => e.kind()).increment(1);
        }
    }
}

/// Installs the Prometheus recorder as the global `metrics` recorder and
/// describes the request metrics on it.
///
/// # Errors
///
/// Fails if a global recorder is already installed.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_request_metrics();
    Ok(handle)
}
