//! Error handling for the crop yield clients
//!
//! Provides consistent JSON error responses for the web routes and a single
//! error type for the prediction service client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FieldErrors, SubmissionError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {fields}")]
    Validation { fields: FieldErrors },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Prediction service error: {0}")]
    PredictionService(String),

    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),
}

impl From<FieldErrors> for AppError {
    fn from(fields: FieldErrors) -> Self {
        AppError::Validation { fields }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation {
            fields: errors.into(),
        }
    }
}

impl AppError {
    /// Collapse into the form-level failure; validation never gets here
    pub fn into_submission_error(self) -> SubmissionError {
        SubmissionError::new(self.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { fields } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "One or more fields are invalid".to_string(),
                    fields: Some(fields.clone()),
                },
            ),
            AppError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: reason.clone(),
                    fields: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    fields: None,
                },
            ),
            AppError::PredictionService(_) | AppError::InvalidResponse(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "PREDICTION_SERVICE_ERROR".to_string(),
                    message: "The prediction service could not handle the request".to_string(),
                    fields: None,
                },
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers and clients
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Field;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let mut fields = FieldErrors::default();
        fields.insert(Field::Year, "Year must be between 1900 and 2100");
        let response = AppError::from(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unreadable_body_maps_to_bad_request() {
        let response =
            AppError::BadRequest("Expected a JSON body".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failures_map_to_bad_gateway() {
        let response = AppError::PredictionService("status 500".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let response = AppError::InvalidResponse("missing field".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_submission_error_keeps_reason() {
        let error = AppError::PredictionService("API returned 503".into()).into_submission_error();
        assert_eq!(error.reason, "Prediction service error: API returned 503");
    }
}
