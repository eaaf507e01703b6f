//! HTTP tests for the prediction routes, run against the router in-process.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use classifier::{StandardScaler, SvcModel};
use serde_json::{json, Value};
use server::{router, AppState, PredictionService};
use tower::ServiceExt;

/// Model that separates classes by sigheight alone: <1.5 m flat,
/// 1.5-2.5 m surfable, larger powerful
fn write_model(dir: &std::path::Path) -> std::path::PathBuf {
    let model = SvcModel {
        feature_names: vec![
            "sigheight".to_string(),
            "swellheight".to_string(),
            "period".to_string(),
            "windspeed".to_string(),
            "winddirdegree".to_string(),
        ],
        scaler: StandardScaler {
            mean: [0.0, 0.0, 0.0, 0.0, 0.0],
            // Only sigheight matters after scaling
            scale: [1.0, 1e6, 1e6, 1e6, 1e6],
        },
        classes: vec![0, 1, 2],
        gamma: 1.0,
        support_vectors: vec![
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0, 0.0, 0.0],
            [3.0, 0.0, 0.0, 0.0, 0.0],
        ],
        n_support: vec![1, 1, 1],
        dual_coef: vec![vec![1.0, -1.0, -1.0], vec![1.0, 1.0, -1.0]],
        intercept: vec![0.0, 0.0, 0.0],
    };
    let path = dir.join("model.json");
    model.save(&path).unwrap();
    path
}

fn app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_model(dir.path());
    let service = PredictionService::from_artifact(&path).unwrap();
    (router(AppState::new(service)), dir)
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_predict_returns_class_label_and_advice() {
    let (app, _dir) = app();
    let body = json!({
        "sigheight": 2.1,
        "swellheight": 1.7,
        "period": 12,
        "windspeed": 8,
        "winddirdegree": 280
    });

    let (status, json) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bulk_class"], 1);
    assert_eq!(json["sea_condition"], "Medium, surfable waves");
    assert_eq!(json["activity"], "Surfing 🏄‍♀️");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_predict_accepts_numeric_strings() {
    let (app, _dir) = app();
    let body = json!({
        "sigheight": "0.6",
        "swellheight": "0.4",
        "period": "7",
        "windspeed": "22",
        "winddirdegree": "45"
    });

    let (status, json) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bulk_class"], 0);
    assert_eq!(json["sea_condition"], "Small / almost flat");
    assert_eq!(json["activity"], "Kitesurf / Windsurf 🪁");
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let (app, _dir) = app();
    let body = json!({
        "sigheight": 1.0,
        "swellheight": 1.0,
        "period": 9,
        "winddirdegree": 90
    });

    let (status, json) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing field 'windspeed'");
}

#[tokio::test]
async fn test_non_numeric_field_is_bad_request() {
    let (app, _dir) = app();
    let body = json!({
        "sigheight": "tall",
        "swellheight": 1.0,
        "period": 9,
        "windspeed": 10,
        "winddirdegree": 90
    });

    let (status, json) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("sigheight"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _dir) = app();

    let (status, json) = post_json(app, "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["classes"], json!([0, 1, 2]));
}
