//! End-to-end HTTP coverage for the campaign creation and status routes,
//! exercised through the router directly (no bound socket).

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use prospecting_api::build_router;
use prospecting_domain::Config;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_state(dir: &TempDir) -> prospecting_api::AppState {
    let config = Config {
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        admin_token: "secret".to_string(),
        ..Config::default()
    };
    prospecting_api::AppState::new(config).await.expect("app state builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn creates_campaign_and_lists_it() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let create_body = json!({
        "profession": "couvreur",
        "city": "Lyon",
        "max_prospects": 10,
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/campaign/create")
        .header("content-type", "application/json")
        .body(Body::from(create_body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let campaign_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "active");

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/campaign/{campaign_id}/status"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["campaign"]["id"], campaign_id);
    assert!(status["scheduler"]["test_sweep"]["running"].is_boolean());
    assert!(status["scheduler"]["test_sweep"]["jobs"].is_array());
}

#[tokio::test]
async fn rejects_blank_profession() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaign/create")
        .header("content-type", "application/json")
        .body(Body::from(json!({"profession": "", "city": "Lyon", "max_prospects": 5}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn unknown_campaign_status_is_404() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/campaign/does-not-exist/status")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_view_requires_token() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/admin/campaign/does-not-exist")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
