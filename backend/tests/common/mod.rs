//! A stand-in for the external prediction service
//!
//! Records every request body it receives and answers all routes with one
//! configured status and body.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::TrainingInput;

pub type Recorded = Arc<Mutex<Vec<(String, Value)>>>;

#[derive(Clone)]
struct FakeService {
    requests: Recorded,
    status: StatusCode,
    body: Value,
}

async fn record(
    State(service): State<FakeService>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    service
        .requests
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));
    (service.status, Json(service.body.clone()))
}

/// Start the fake service on an ephemeral port; returns its base URL
pub async fn spawn_service(status: StatusCode, body: Value) -> (String, Recorded) {
    let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/predict", post(record))
        .route("/train", post(record))
        .route("/info", post(record))
        .route("/api/train", post(record))
        .with_state(FakeService {
            requests: requests.clone(),
            status,
            body,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

pub async fn spawn_predicting(predicted_yield: f64) -> (String, Recorded) {
    spawn_service(StatusCode::OK, json!({ "predicted_yield": predicted_yield })).await
}

pub async fn spawn_failing() -> (String, Recorded) {
    spawn_service(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model not loaded" }),
    )
    .await
}

pub fn requests(recorded: &Recorded) -> Vec<(String, Value)> {
    recorded.lock().unwrap().clone()
}

pub fn observation() -> TrainingInput {
    TrainingInput {
        area: "Albania".to_string(),
        item: "Maize".to_string(),
        rainfall: 1485.0,
        pesticides: 121.0,
        temp: 16.37,
        year: 1990,
        yield_value: 36613.0,
    }
}
