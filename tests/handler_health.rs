mod common;

use axum::http::StatusCode;
use common::{RecordingPublisher, StaticSocialGraph, build_app, default_app};
use link_service::domain::EventSink;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = default_app(10);

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["event_bus"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = default_app(10);

    let json = app.server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("store").is_some());
    assert!(json["checks"].get("event_bus").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_event_bus_down() {
    let app = build_app(
        StaticSocialGraph::new(&["alice"]),
        EventSink::publishing(Arc::new(RecordingPublisher::failing())),
        10,
    );

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["event_bus"]["status"], "error");
}

#[tokio::test]
async fn test_metrics_not_found_when_exporter_disabled() {
    let app = default_app(10);

    app.server.get("/metrics").await.assert_status_not_found();
}
