//! Request metrics decorator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::application::services::LinkManager;
use crate::domain::LinkError;
use crate::domain::entities::{Link, LinkFilter, LinkPatch, NewLink};

/// Observer receiving one record per service call.
///
/// # Implementations
///
/// - [`crate::infrastructure::metrics::FacadeRequestMetrics`] - `metrics` crate facade
pub trait RequestMetrics: Send + Sync {
    /// Records a completed call. `error` is `None` on success.
    fn record(&self, method: &'static str, elapsed: Duration, error: Option<&LinkError>);
}

/// Records a count and a duration for every call to the wrapped [`LinkManager`].
///
/// Placed outermost so the observed latency covers every inner layer.
pub struct MetricsMiddleware<M> {
    next: M,
    metrics: Arc<dyn RequestMetrics>,
}

impl<M: LinkManager> MetricsMiddleware<M> {
    pub fn new(next: M, metrics: Arc<dyn RequestMetrics>) -> Self {
        Self { next, metrics }
    }

    fn observe<T>(&self, method: &'static str, started: Instant, result: &Result<T, LinkError>) {
        self.metrics
            .record(method, started.elapsed(), result.as_ref().err());
    }
}

#[async_trait]
impl<M: LinkManager> LinkManager for MetricsMiddleware<M> {
    async fn add_link(&self, new_link: NewLink) -> Result<Link, LinkError> {
        let started = Instant::now();
        let result = self.next.add_link(new_link).await;
        self.observe("add_link", started, &result);
        result
    }

    async fn update_link(
        &self,
        owner: &str,
        url: &str,
        patch: LinkPatch,
    ) -> Result<Link, LinkError> {
        let started = Instant::now();
        let result = self.next.update_link(owner, url, patch).await;
        self.observe("update_link", started, &result);
        result
    }

    async fn delete_link(&self, owner: &str, url: &str) -> Result<(), LinkError> {
        let started = Instant::now();
        let result = self.next.delete_link(owner, url).await;
        self.observe("delete_link", started, &result);
        result
    }

    async fn get_links(&self, owner: &str, filter: LinkFilter) -> Result<Vec<Link>, LinkError> {
        let started = Instant::now();
        let result = self.next.get_links(owner, filter).await;
        self.observe("get_links", started, &result);
        result
    }
}
