//! Web route tests
//!
//! Drives the router with `tower::ServiceExt::oneshot`; `/api/train` is
//! backed by a fake prediction service.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use crop_yield_backend::{create_app, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{requests, spawn_failing, spawn_service};

fn app(base_url: &str) -> Router {
    create_app(AppState::new(Config::default().with_base_url(base_url)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn record() -> Value {
    json!({
        "area": "India",
        "item": "Wheat",
        "rainfall": 150,
        "pesticides": 10,
        "temp": 25,
        "year": 2023,
        "yield_value": 5
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app("http://upstream:8000"), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["platform"], "web");
    assert_eq!(body["prediction_service"], "http://upstream:8000");
}

#[tokio::test]
async fn test_reference_lists() {
    let (status, body) = send(app("http://upstream:8000"), get("/api/reference")).await;
    assert_eq!(status, StatusCode::OK);
    let countries = body["countries"].as_array().unwrap();
    assert_eq!(countries.len(), shared::COUNTRIES.len());
    assert!(countries.contains(&json!("India")));
    assert!(body["crop_types"].as_array().unwrap().contains(&json!("Wheat")));
}

#[tokio::test]
async fn test_form_defaults() {
    let (status, body) = send(app("http://upstream:8000"), get("/api/defaults/training")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["area"], "India");
    assert_eq!(body["yield_value"], "5");

    let (status, body) = send(app("http://upstream:8000"), get("/api/defaults/prediction")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("yield_value").is_none());

    let (status, body) = send(app("http://upstream:8000"), get("/api/defaults/info")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_train_proxy_forwards_batch_of_one() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let (status, body) = send(app(&base_url), post_json("/api/train", &record())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");

    let sent = requests(&recorded);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "/train");
    let batch = sent[0].1.as_array().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0]["area"], "India");
    assert_eq!(batch[0]["yield_value"], json!(5.0));
    assert!(batch[0].get("is_trained").is_none());
}

#[tokio::test]
async fn test_train_proxy_rejects_invalid_record() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let mut invalid = record();
    invalid["rainfall"] = json!(-1);
    invalid["yield_value"] = json!(0);
    let (status, body) = send(app(&base_url), post_json("/api/train", &invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["fields"]["rainfall"],
        "Rainfall must be a non-negative number"
    );
    assert_eq!(
        body["error"]["fields"]["yield_value"],
        "Yield value must be a positive number"
    );
    assert!(requests(&recorded).is_empty());
}

#[tokio::test]
async fn test_train_proxy_reports_upstream_failure() {
    let (base_url, _) = spawn_failing().await;

    let (status, body) = send(app(&base_url), post_json("/api/train", &record())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "PREDICTION_SERVICE_ERROR");
}

#[tokio::test]
async fn test_train_proxy_reports_missing_field() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let mut missing = record();
    missing.as_object_mut().unwrap().remove("yield_value");
    let (status, body) = send(app(&base_url), post_json("/api/train", &missing)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"]["yield_value"], "Yield value is required");
    assert!(requests(&recorded).is_empty());
}

#[tokio::test]
async fn test_train_proxy_reports_fractional_year() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let mut fractional = record();
    fractional["year"] = json!(2020.5);
    let (status, body) = send(app(&base_url), post_json("/api/train", &fractional)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"]["year"], "Year must be a whole number");
    assert_eq!(body["error"]["fields"].as_object().unwrap().len(), 1);
    assert!(requests(&recorded).is_empty());
}

#[tokio::test]
async fn test_train_proxy_accepts_numeric_text() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let mut typed = record();
    typed["rainfall"] = json!("150");
    typed["year"] = json!("2023");
    let (status, _) = send(app(&base_url), post_json("/api/train", &typed)).await;

    assert_eq!(status, StatusCode::OK);
    let sent = requests(&recorded);
    assert_eq!(sent[0].1[0]["rainfall"], json!(150.0));
    assert_eq!(sent[0].1[0]["year"], json!(2023));
}

#[tokio::test]
async fn test_train_proxy_rejects_unreadable_body() {
    let (base_url, recorded) = spawn_service(StatusCode::OK, json!({})).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/train")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(&base_url), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(requests(&recorded).is_empty());
}
