//! Structured logging decorator.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{Instrument, Span, error, info};

use crate::application::services::LinkManager;
use crate::domain::LinkError;
use crate::domain::entities::{Link, LinkFilter, LinkPatch, NewLink};

/// Logs every call to the wrapped [`LinkManager`].
///
/// The inner call runs inside the span supplied at construction, and one
/// event is emitted per call with `method`, `owner`, `took_ms` and, on
/// failure, `error_kind` and `error`. Caller-correctable errors are logged at
/// `INFO`, infrastructure errors at `ERROR`. Arguments and results pass
/// through untouched.
pub struct LoggingMiddleware<M> {
    next: M,
    span: Span,
}

impl<M: LinkManager> LoggingMiddleware<M> {
    pub fn new(next: M, span: Span) -> Self {
        Self { next, span }
    }

    fn log_outcome<T>(
        &self,
        method: &'static str,
        owner: &str,
        started: Instant,
        result: &Result<T, LinkError>,
    ) {
        let took_ms = started.elapsed().as_millis() as u64;
        let _entered = self.span.enter();

        match result {
            Ok(_) => info!(method, owner, took_ms, "request completed"),
            Err(e) if e.is_client_error() => info!(
                method,
                owner,
                took_ms,
                error_kind = e.kind(),
                error = %e,
                "request rejected"
            ),
            Err(e) => error!(
                method,
                owner,
                took_ms,
                error_kind = e.kind(),
                error = %e,
                "request failed"
            ),
        }
    }
}

#[async_trait]
impl<M: LinkManager> LinkManager for LoggingMiddleware<M> {
    async fn add_link(&self, new_link: NewLink) -> Result<Link, LinkError> {
        let owner = new_link.owner.clone();
        let started = Instant::now();
        let result = self
            .next
            .add_link(new_link)
            .instrument(self.span.clone())
            .await;
        self.log_outcome("add_link", &owner, started, &result);
        result
    }

    async fn update_link(
        &self,
        owner: &str,
        url: &str,
        patch: LinkPatch,
    ) -> Result<Link, LinkError> {
        let started = Instant::now();
        let result = self
            .next
            .update_link(owner, url, patch)
            .instrument(self.span.clone())
            .await;
        self.log_outcome("update_link", owner, started, &result);
        result
    }

    async fn delete_link(&self, owner: &str, url: &str) -> Result<(), LinkError> {
        let started = Instant::now();
        let result = self
            .next
            .delete_link(owner, url)
            .instrument(self.span.clone())
            .await;
        self.log_outcome("delete_link", owner, started, &result);
        result
    }

    async fn get_links(&self, owner: &str, filter: LinkFilter) -> Result<Vec<Link>, LinkError> {
        let started = Instant::now();
        let result = self
            .next
            .get_links(owner, filter)
            .instrument(self.span.clone())
            .await;
        self.log_outcome("get_links", owner, started, &result);
        result
    }
}
