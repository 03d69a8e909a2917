//! Shared application state for HTTP handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::services::LinkManager;
use crate::domain::repositories::LinkStore;
use crate::domain::EventSink;

/// State cloned into every handler.
///
/// `link_manager` is the fully decorated service chain; handlers never see
/// the core service directly. `store` and `event_sink` are kept for health
/// checks only.
#[derive(Clone)]
pub struct AppState {
    pub link_manager: Arc<dyn LinkManager>,
    pub store: Arc<dyn LinkStore>,
    pub event_sink: EventSink,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        link_manager: Arc<dyn LinkManager>,
        store: Arc<dyn LinkStore>,
        event_sink: EventSink,
    ) -> Self {
        Self {
            link_manager,
            store,
            event_sink,
            metrics_handle: None,
        }
    }

    /// Attaches the Prometheus handle rendered by `GET /metrics`.
    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
