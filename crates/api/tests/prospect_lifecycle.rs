//! End-to-end coverage of scan → dry-run sweep → scoring → asset gate →
//! mark-ready, driven entirely through HTTP.

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
        base_url: "https://base.example".to_string(),
        ..Config::default()
    };
    prospecting_api::AppState::new(config).await.expect("app state builds")
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn full_dry_run_lifecycle_reaches_ready_to_send() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let (_, campaign) = post(
        &app,
        "/api/campaign/create",
        json!({"profession": "couvreur", "city": "Lyon", "max_prospects": 5}),
    )
    .await;
    let campaign_id = campaign["id"].as_str().unwrap().to_string();

    let (status, scan) = post(
        &app,
        "/api/prospect-scan",
        json!({
            "campaign_id": campaign_id,
            "manual_prospects": [{
                "name": "Toiture Martin",
                "city": "Lyon",
                "profession": "couvreur",
                "website": "https://martin-couvreur.fr",
            }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let prospect_id = scan[0]["id"].as_str().unwrap().to_string();
    assert_eq!(scan[0]["status"], "scheduled");

    let (status, sweep) = post(
        &app,
        &format!("/api/ia-test/run?dry_run=true"),
        json!({"campaign_id": campaign_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // One prospect, dry-run sweep across all three models: one TestRun per model.
    assert_eq!(sweep["runs_created"], 3);
    assert!(sweep["errors"].as_array().unwrap().is_empty());

    let (status, scoring) =
        post(&app, "/api/scoring/run", json!({"campaign_id": campaign_id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scoring["scored"], 1);

    let (status, assets) = post(
        &app,
        &format!("/api/prospect/{prospect_id}/assets"),
        json!({"video_url": "https://cdn.example/v.mp4", "screenshot_url": "https://cdn.example/s.png"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assets["status"], "ready_assets");

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/prospect/{prospect_id}/mark-ready"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let ready: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(ready["landing_url"].as_str().unwrap().contains("/couvreur?t="));
}

#[tokio::test]
async fn mark_ready_without_assets_is_gate_blocked() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let app = build_router(state);

    let (_, campaign) = post(
        &app,
        "/api/campaign/create",
        json!({"profession": "plombier", "city": "Paris", "max_prospects": 5}),
    )
    .await;
    let campaign_id = campaign["id"].as_str().unwrap().to_string();

    let (_, scan) = post(
        &app,
        "/api/prospect-scan",
        json!({
            "campaign_id": campaign_id,
            "manual_prospects": [{"name": "Plomberie X", "city": "Paris", "profession": "plombier"}],
        }),
    )
    .await;
    let prospect_id = scan[0]["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/prospect/{prospect_id}/mark-ready"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "gate_blocked");
}
