//! Client-side validation of Yield Observations
//!
//! The field constraints are declared on the wire types in
//! [`crate::models`]; this module holds the custom rules those
//! declarations refer to and flattens the result into one message per field.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Field, FormValues, PredictionInput, TrainingInput};
use crate::reference::{is_known_country, is_known_crop_type};

// ============================================================================
// Custom Rules
// ============================================================================

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Country must be one the service was trained on
///
/// Empty values are left to the `length` rule so a blank picker reports a
/// single message.
pub fn validate_country(area: &str) -> Result<(), ValidationError> {
    if area.is_empty() || is_known_country(area) {
        Ok(())
    } else {
        Err(rule_error("unknown_country", "Please select a valid country"))
    }
}

pub fn validate_crop_type(item: &str) -> Result<(), ValidationError> {
    if item.is_empty() || is_known_crop_type(item) {
        Ok(())
    } else {
        Err(rule_error("unknown_crop_type", "Please select a valid crop type"))
    }
}

/// Strictly greater than zero
pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(rule_error("positive", "Yield value must be a positive number"))
    }
}

// ============================================================================
// Field Errors
// ============================================================================

/// One human-readable message per invalid field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Record a message unless the field already has one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Fold `validator` output in, keeping the first message of each field
    pub fn extend_from(&mut self, errors: &ValidationErrors) {
        for (name, field_errors) in errors.field_errors() {
            let Some(field) = Field::from_name(name) else {
                continue;
            };
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field.label()));
                self.insert(field, message);
            }
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        fields.extend_from(&errors);
        fields
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Validate an already typed prediction record
pub fn validate_prediction(input: &PredictionInput) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}

pub fn validate_training(input: &TrainingInput) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}

/// Coerce and validate raw prediction form input
pub fn parse_prediction(values: &FormValues) -> Result<PredictionInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let input = values.coerce_prediction(&mut errors);
    if let Err(schema) = input.validate() {
        errors.extend_from(&schema);
    }
    errors.into_result().map(|_| input)
}

/// Coerce and validate raw training form input
pub fn parse_training(values: &FormValues) -> Result<TrainingInput, FieldErrors> {
    let mut errors = FieldErrors::default();
    let input = values.coerce_training(&mut errors);
    if let Err(schema) = input.validate() {
        errors.extend_from(&schema);
    }
    errors.into_result().map(|_| input)
}
