#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_service::application::middleware::{RequestMetrics, compose};
use link_service::application::services::LinkService;
use link_service::domain::repositories::LinkStore;
use link_service::domain::social_graph::SocialGraphClient;
use link_service::domain::{
    EventPayload, EventPublisher, EventSink, LinkError, PublishError, SocialGraphError,
};
use link_service::infrastructure::persistence::MemoryLinkStore;
use link_service::routes::router;
use link_service::state::AppState;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const OWNER_HEADER: &str = "x-username";

/// Social graph that knows a fixed set of users.
pub struct StaticSocialGraph {
    users: HashSet<String>,
}

impl StaticSocialGraph {
    pub fn new(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SocialGraphClient for StaticSocialGraph {
    async fn validate_user(&self, username: &str) -> Result<(), SocialGraphError> {
        if self.users.contains(username) {
            Ok(())
        } else {
            Err(SocialGraphError::UnknownUser(username.to_string()))
        }
    }
}

/// Social graph that is always unreachable.
pub struct DownSocialGraph;

#[async_trait]
impl SocialGraphClient for DownSocialGraph {
    async fn validate_user(&self, _username: &str) -> Result<(), SocialGraphError> {
        Err(SocialGraphError::Unavailable("connection refused".into()))
    }
}

/// Publisher that records every payload, optionally failing each publish.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<EventPayload>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn payloads(&self) -> Vec<EventPayload> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, payload: &EventPayload) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Timeout(Duration::from_millis(1)));
        }
        self.published.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }
}

struct NoopMetrics;

impl RequestMetrics for NoopMetrics {
    fn record(&self, _method: &'static str, _elapsed: Duration, _error: Option<&LinkError>) {}
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryLinkStore>,
}

/// Builds the full router over an in-memory store.
pub fn build_app<G>(social_graph: G, event_sink: EventSink, max_links: u64) -> TestApp
where
    G: SocialGraphClient + 'static,
{
    let store = Arc::new(MemoryLinkStore::new());
    let state = build_state(store.clone(), social_graph, event_sink, max_links);
    let server = TestServer::new(router(state)).unwrap();

    TestApp { server, store }
}

pub fn build_state<G>(
    store: Arc<MemoryLinkStore>,
    social_graph: G,
    event_sink: EventSink,
    max_links: u64,
) -> AppState
where
    G: SocialGraphClient + 'static,
{
    let core = LinkService::new(
        store.clone(),
        Arc::new(social_graph),
        event_sink.clone(),
        max_links,
    )
    .unwrap();
    let link_manager = compose(core, tracing::Span::none(), Arc::new(NoopMetrics));
    let store: Arc<dyn LinkStore> = store;

    AppState::new(link_manager, store, event_sink)
}

/// App with users `alice` and `bob`, a no-op sink and the given quota.
pub fn default_app(max_links: u64) -> TestApp {
    build_app(
        StaticSocialGraph::new(&["alice", "bob"]),
        EventSink::Noop,
        max_links,
    )
}
