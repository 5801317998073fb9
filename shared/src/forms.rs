//! Form state for the prediction and training flows
//!
//! A form owns its raw values, the per-field errors of the last submit
//! attempt, a busy flag and the result indicators. Submitting is split in
//! two so the caller can run the request in whatever runtime it has:
//! `begin_submit` validates and marks the form busy, `finish_submit`
//! records the outcome and clears the flag.

use thiserror::Error;

use crate::models::{
    format_predicted_yield, Field, FormValues, PredictionInput, TrainingInput,
};
use crate::types::{FormKind, Platform};
use crate::validation::{parse_prediction, parse_training, FieldErrors};

/// Message shown when a prediction request fails for any reason
pub const PREDICTION_FAILED: &str = "An error occurred while getting the prediction";

/// Message shown when a training submission fails for any reason
pub const TRAINING_FAILED: &str = "An error occurred while submitting training data";

/// Why a submit did not start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    Busy,

    #[error("invalid input: {0}")]
    Invalid(FieldErrors),
}

/// Failure of a submission after it left the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SubmissionError {
    pub reason: String,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Prediction Form
// ============================================================================

#[derive(Debug, Clone)]
pub struct PredictionForm {
    values: FormValues,
    field_errors: FieldErrors,
    busy: bool,
    prediction: Option<f64>,
    error: Option<String>,
}

impl PredictionForm {
    pub fn new(platform: Platform) -> Self {
        Self::with_values(FormValues::defaults(platform, FormKind::Prediction))
    }

    pub fn with_values(values: FormValues) -> Self {
        Self {
            values,
            field_errors: FieldErrors::default(),
            busy: false,
            prediction: None,
            error: None,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Formatted prediction, hidden while an error is shown
    pub fn displayed_prediction(&self) -> Option<String> {
        match (self.prediction, &self.error) {
            (Some(value), None) => Some(format_predicted_yield(value)),
            _ => None,
        }
    }

    /// Validate the current values and mark the form busy
    pub fn begin_submit(&mut self) -> Result<PredictionInput, SubmitBlocked> {
        if self.busy {
            return Err(SubmitBlocked::Busy);
        }
        match parse_prediction(&self.values) {
            Ok(input) => {
                self.field_errors = FieldErrors::default();
                self.busy = true;
                self.error = None;
                self.prediction = None;
                Ok(input)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// Record the outcome of the request started by `begin_submit`
    pub fn finish_submit(&mut self, result: Result<f64, SubmissionError>) {
        self.busy = false;
        match result {
            Ok(value) => self.prediction = Some(value),
            Err(_) => self.error = Some(PREDICTION_FAILED.to_string()),
        }
    }
}

// ============================================================================
// Training Form
// ============================================================================

#[derive(Debug, Clone)]
pub struct TrainingForm {
    defaults: FormValues,
    values: FormValues,
    field_errors: FieldErrors,
    busy: bool,
    success: bool,
    error: Option<String>,
    in_flight: Option<TrainingInput>,
}

impl TrainingForm {
    pub fn new(platform: Platform) -> Self {
        Self::with_values(FormValues::defaults(platform, FormKind::Training))
    }

    pub fn with_values(values: FormValues) -> Self {
        Self {
            defaults: values.clone(),
            values,
            field_errors: FieldErrors::default(),
            busy: false,
            success: false,
            error: None,
            in_flight: None,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Values the form resets to
    pub fn defaults(&self) -> &FormValues {
        &self.defaults
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// Whether the current values differ from the reset values
    pub fn is_dirty(&self) -> bool {
        self.values != self.defaults
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_submit(&mut self) -> Result<TrainingInput, SubmitBlocked> {
        if self.busy {
            return Err(SubmitBlocked::Busy);
        }
        match parse_training(&self.values) {
            Ok(input) => {
                self.field_errors = FieldErrors::default();
                self.busy = true;
                self.error = None;
                self.success = false;
                self.in_flight = Some(input.clone());
                Ok(input)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// On success the submitted values become the form's reset values
    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        self.busy = false;
        let submitted = self.in_flight.take();
        match result {
            Ok(()) => {
                if let Some(input) = submitted {
                    let values = FormValues::from(&input);
                    self.defaults = values.clone();
                    self.values = values;
                }
                self.success = true;
                self.error = None;
            }
            Err(_) => {
                self.success = false;
                self.error = Some(TRAINING_FAILED.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.field_errors = FieldErrors::default();
    }
}
