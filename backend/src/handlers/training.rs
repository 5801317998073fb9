//! Training data proxy handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use shared::{parse_training, FormValues, TrainingEndpoint};

use crate::error::{AppError, AppResult};
use crate::services::TrainingService;
use crate::AppState;

/// Accept one labeled observation from the web form and forward it to the
/// prediction service's `/train` route
///
/// The body is read as raw form values so that type mistakes (a fractional
/// year, a missing field) come back as per-field validation errors.
pub async fn submit_training(
    State(state): State<AppState>,
    payload: Result<Json<FormValues>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(values) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let input = parse_training(&values)?;

    let service = TrainingService::with_endpoint(state.client.clone(), TrainingEndpoint::Train);
    service.forward(&input).await?;
    Ok(Json(json!({ "status": "submitted" })))
}
