//! Reference data handlers for populating the form pickers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{FormKind, FormValues, COUNTRIES, CROP_TYPES};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Serialize)]
pub struct ReferenceData {
    pub countries: &'static [&'static str],
    pub crop_types: &'static [&'static str],
}

/// List the countries and crop types the pickers offer
pub async fn get_reference() -> Json<ReferenceData> {
    Json(ReferenceData {
        countries: COUNTRIES,
        crop_types: CROP_TYPES,
    })
}

/// Pre-filled values for the `prediction` or `training` form
pub async fn get_defaults(
    State(state): State<AppState>,
    Path(form): Path<String>,
) -> AppResult<Json<FormValues>> {
    let kind = FormKind::from_name(&form)
        .ok_or_else(|| AppError::NotFound(format!("Form '{}'", form)))?;
    Ok(Json(FormValues::defaults(state.config.platform, kind)))
}
