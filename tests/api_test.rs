//! Router-level tests exercising the HTTP surface end to end against an
//! in-process engine and a temp-dir snapshot store.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use feedrank::app::{ComponentRegistry, build_router};
use feedrank::config::Config;
use feedrank::store::FileSnapshotStore;

fn test_router(snapshot_dir: &Path) -> Router {
    let config = Config::from_env().expect("config");
    let registry = ComponentRegistry::build(config)
        .expect("registry")
        .with_snapshot_store(Arc::new(FileSnapshotStore::new(
            snapshot_dir.join("snapshot.json"),
        )));
    build_router(registry)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn seed_catalog(router: &Router) {
    let requests = [
        post_json(
            "/v1/content",
            json!({
                "id": "c1",
                "title": "Rust Intro",
                "category": "tech",
                "tags": ["rust", "ai"],
                "description": "rust basics for newcomers"
            }),
        ),
        post_json(
            "/v1/content",
            json!({
                "id": "c2",
                "title": "Jazz Hour",
                "category": "music",
                "tags": ["jazz"],
                "description": "late night jazz session"
            }),
        ),
        post_json(
            "/v1/users",
            json!({ "id": "u1", "interests": ["rust", "ai"] }),
        ),
    ];
    for request in requests {
        let response = router.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn health_endpoints_respond_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());

    for uri in ["/health/live", "/health/ready"] {
        let response = router.clone().oneshot(get(uri)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn duplicate_content_id_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/v1/content",
            json!({
                "id": "c1",
                "title": "Rust Intro",
                "category": "tech"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().expect("error field").contains("c1"));
}

#[tokio::test]
async fn interaction_with_unknown_ids_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/v1/interactions",
            json!({ "user_id": "ghost", "content_id": "c1" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .clone()
        .oneshot(post_json(
            "/v1/interactions",
            json!({ "user_id": "u1", "content_id": "c1", "kind": "like" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn recommendations_return_scored_items() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(get("/v1/recommendations/u1?count=5&hour=10&weekend=false"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(response).await;
    let items = items.as_array().expect("array body");
    assert!(!items.is_empty());
    for item in items {
        assert!(item["id"].is_string());
        let score = item["score"].as_f64().expect("score");
        assert!((0.0..=1.0).contains(&score));
        assert!(item["reason"].is_string());
    }
    // The tag-matching item must lead with a fixed morning weekday context.
    assert_eq!(items[0]["id"], "c1");
}

#[tokio::test]
async fn stats_reflect_recorded_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/v1/interactions",
            json!({ "user_id": "u1", "content_id": "c2", "kind": "view" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .clone()
        .oneshot(get("/v1/stats"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["content_count"], 2);
    assert_eq!(stats["user_count"], 1);
    assert_eq!(stats["interaction_count"], 1);
}

#[tokio::test]
async fn snapshot_save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(post_json("/v1/snapshot/save", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(dir.path().join("snapshot.json").exists());

    // A fresh service restores the saved state from the same path.
    let restored = test_router(dir.path());
    let response = restored
        .clone()
        .oneshot(post_json("/v1/snapshot/load", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = restored
        .clone()
        .oneshot(get("/v1/stats"))
        .await
        .expect("response");
    let stats = body_json(response).await;
    assert_eq!(stats["content_count"], 2);
    assert_eq!(stats["user_count"], 1);
}

#[tokio::test]
async fn snapshot_load_without_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());

    let response = router
        .clone()
        .oneshot(post_json("/v1/snapshot/load", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_exposes_counters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let router = test_router(dir.path());
    seed_catalog(&router).await;

    let response = router
        .clone()
        .oneshot(get("/metrics"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let rendered = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(rendered.contains("feedrank_content_added_total"));
    assert!(rendered.contains("feedrank_users_added_total"));
}
