//! Observational decorators over [`LinkManager`].
//!
//! Each decorator implements [`LinkManager`], holds the next layer and only
//! observes: arguments, results and errors are forwarded verbatim, so an
//! error's kind is the same at the outermost layer as in the core.
//!
//! [`compose`] fixes the order used in production:
//!
//! ```text
//! MetricsMiddleware -> LoggingMiddleware -> LinkService
//! ```

pub mod logging;
pub mod metrics;

use std::sync::Arc;

use tracing::Span;

use crate::application::services::LinkManager;

pub use logging::LoggingMiddleware;
pub use metrics::{MetricsMiddleware, RequestMetrics};

/// Wraps `core` with logging, then metrics, and returns the shared handle.
pub fn compose<M>(core: M, span: Span, metrics: Arc<dyn RequestMetrics>) -> Arc<dyn LinkManager>
where
    M: LinkManager + 'static,
{
    Arc::new(MetricsMiddleware::new(
        LoggingMiddleware::new(core, span),
        metrics,
    ))
}
