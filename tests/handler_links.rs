mod common;

use axum::http::StatusCode;
use common::{
    DownSocialGraph, OWNER_HEADER, RecordingPublisher, StaticSocialGraph, build_app, default_app,
};
use link_service::domain::EventKind;
use link_service::domain::EventSink;
use serde_json::{Value, json};
use std::sync::Arc;

#[tokio::test]
async fn test_add_and_list_links() {
    let app = default_app(10);

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({
            "url": "https://example.com",
            "title": "Example",
            "tags": ["rust", "web"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["title"], "Example");
    assert_eq!(body["description"], "");
    assert_eq!(body["tags"], json!(["rust", "web"]));

    let response = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "alice")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_links_are_scoped_to_owner() {
    let app = default_app(10);

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await
        .assert_status(StatusCode::CREATED);

    let body = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "bob")
        .await
        .json::<Value>();

    assert_eq!(body["links"], json!([]));
}

#[tokio::test]
async fn test_quota_exceeded_returns_bad_request() {
    let app = default_app(2);

    for url in ["https://a.example", "https://b.example"] {
        app.server
            .post("/links")
            .add_header(OWNER_HEADER, "alice")
            .json(&json!({ "url": url, "title": "t" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://c.example", "title": "t" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["details"]["kind"], "quota_exceeded");
    assert_eq!(body["error"]["details"]["max_links_per_user"], 2);

    // Another user still has room.
    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "bob")
        .json(&json!({ "url": "https://c.example", "title": "t" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_duplicate_link_returns_conflict() {
    let app = default_app(10);
    let payload = json!({ "url": "https://example.com", "title": "Example" });

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&payload)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_unknown_owner_returns_bad_request() {
    let app = default_app(10);

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "mallory")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["kind"],
        "invalid_owner"
    );
}

#[tokio::test]
async fn test_missing_owner_header_returns_bad_request() {
    let app = default_app(10);

    app.server
        .get("/links")
        .await
        .assert_status_bad_request();

    app.server
        .post("/links")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_invalid_url_returns_validation_error() {
    let app = default_app(10);

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "not a url", "title": "Example" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_update_link() {
    let app = default_app(10);

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({
            "url": "https://example.com",
            "title": "Old",
            "tags": ["draft"]
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .put("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({
            "url": "https://example.com",
            "title": "New",
            "add_tags": ["rust"],
            "remove_tags": ["draft"]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], "New");
    assert_eq!(body["tags"], json!(["rust"]));
}

#[tokio::test]
async fn test_update_missing_link_returns_not_found() {
    let app = default_app(10);

    let response = app
        .server
        .put("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://missing.example", "title": "x" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link() {
    let app = default_app(10);

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .delete("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("url", "https://example.com")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .delete("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("url", "https://example.com")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_frees_quota() {
    let app = default_app(1);

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://a.example", "title": "a" }))
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .delete("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("url", "https://a.example")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://b.example", "title": "b" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_get_links_with_filters() {
    let app = default_app(10);

    for (url, title, tags) in [
        ("https://rust-lang.org", "Rust", json!(["lang"])),
        ("https://go.dev", "Go", json!(["lang"])),
        ("https://docs.rs", "Docs", json!(["docs"])),
    ] {
        app.server
            .post("/links")
            .add_header(OWNER_HEADER, "alice")
            .json(&json!({ "url": url, "title": title, "tags": tags }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("tag", "lang")
        .await
        .json::<Value>();
    let urls: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["https://rust-lang.org", "https://go.dev"]);

    let body = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("tag", "lang")
        .add_query_param("title_regex", "^R")
        .await
        .json::<Value>();
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
    assert_eq!(body["links"][0]["title"], "Rust");
}

#[tokio::test]
async fn test_invalid_filter_returns_bad_request() {
    let app = default_app(10);

    let response = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("url_regex", "(unclosed")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["kind"],
        "invalid_filter"
    );
}

#[tokio::test]
async fn test_social_graph_down_returns_service_unavailable() {
    let app = build_app(DownSocialGraph, EventSink::Noop, 10);

    let response = app
        .server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "service_unavailable"
    );
}

#[tokio::test]
async fn test_mutations_publish_events() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = build_app(
        StaticSocialGraph::new(&["alice"]),
        EventSink::publishing(publisher.clone()),
        10,
    );

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .put("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Renamed" }))
        .await
        .assert_status_ok();
    app.server
        .delete("/links")
        .add_header(OWNER_HEADER, "alice")
        .add_query_param("url", "https://example.com")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let payloads = publisher.payloads();
    let kinds: Vec<EventKind> = payloads.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Added, EventKind::Updated, EventKind::Deleted]
    );
    assert_eq!(payloads[1].title.as_deref(), Some("Renamed"));
    assert_eq!(payloads[2].title, None);
}

#[tokio::test]
async fn test_publish_failure_does_not_fail_request() {
    let publisher = Arc::new(RecordingPublisher::failing());
    let app = build_app(
        StaticSocialGraph::new(&["alice"]),
        EventSink::publishing(publisher),
        10,
    );

    app.server
        .post("/links")
        .add_header(OWNER_HEADER, "alice")
        .json(&json!({ "url": "https://example.com", "title": "Example" }))
        .await
        .assert_status(StatusCode::CREATED);

    let body = app
        .server
        .get("/links")
        .add_header(OWNER_HEADER, "alice")
        .await
        .json::<Value>();
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
}
