//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, the event sink, service composition, and the Axum
//! server lifecycle.

use crate::application::middleware::{RequestMetrics, compose};
use crate::application::services::LinkService;
use crate::config::{Config, StoreBackend};
use crate::domain::EventSink;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::events::RedisEventPublisher;
use crate::infrastructure::metrics::{FacadeRequestMetrics, install_prometheus_recorder};
use crate::infrastructure::persistence::{MemoryLinkStore, PgLinkStore};
use crate::infrastructure::social_graph::HttpSocialGraphClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Prometheus recorder (if enabled), before the service chain is built
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Event sink (Redis publisher, or no-op when no bus is configured)
/// - Social-graph client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - A configured event bus cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    // Installed before any metric is touched.
    let metrics_handle = if config.metrics_enabled {
        let handle = install_prometheus_recorder().context("Failed to install metrics recorder")?;
        tracing::info!("Prometheus metrics enabled at /metrics");
        Some(handle)
    } else {
        None
    };

    let mut state = build_state(&config).await?;
    if let Some(handle) = metrics_handle {
        state = state.with_metrics_handle(handle);
    }

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires every collaborator and returns the handler state.
///
/// The decorator chain is `metrics -> logging -> core`.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = build_store(config).await?;
    let event_sink = build_event_sink(config).await?;

    let social_graph = Arc::new(
        HttpSocialGraphClient::new(&config.social_graph_endpoint)
            .context("Failed to build social graph client")?,
    );

    let core = LinkService::new(
        store.clone(),
        social_graph,
        event_sink.clone(),
        config.max_links_per_user,
    )?;

    let metrics: Arc<dyn RequestMetrics> = Arc::new(FacadeRequestMetrics::new());
    let link_manager = compose(core, tracing::info_span!("link_manager"), metrics);

    Ok(AppState::new(link_manager, store, event_sink))
}

async fn build_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store, data is lost on restart");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres store")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgLinkStore::new(Arc::new(pool))))
        }
    }
}

async fn build_event_sink(config: &Config) -> Result<EventSink> {
    let Some(bus_url) = &config.event_bus_url else {
        tracing::info!("Event bus disabled (no-op sink)");
        return Ok(EventSink::Noop);
    };

    let publisher = RedisEventPublisher::connect(
        bus_url,
        config.event_bus_channel.clone(),
        config.event_publish_timeout(),
    )
    .await
    .context("Failed to connect to event bus")?;

    tracing::info!("Event bus enabled (Redis pub/sub)");
    Ok(EventSink::publishing(Arc::new(publisher)))
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
