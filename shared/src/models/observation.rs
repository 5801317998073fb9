//! Yield Observation wire types
//!
//! One flat record exchanged with the prediction service. The constraints
//! live on the types as `validator` attributes so both the prediction and
//! the training flow check fields from the same definition.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_country, validate_crop_type, validate_positive};

/// Request body for `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionInput {
    #[validate(
        length(min = 1, message = "Please select a country"),
        custom = "validate_country"
    )]
    pub area: String,

    #[validate(
        length(min = 1, message = "Please select a crop type"),
        custom = "validate_crop_type"
    )]
    pub item: String,

    /// Rainfall in mm per year
    #[validate(range(min = 0.0, message = "Rainfall must be a non-negative number"))]
    pub rainfall: f64,

    /// Pesticides in tonnes
    #[validate(range(min = 0.0, message = "Pesticides must be a non-negative number"))]
    pub pesticides: f64,

    /// Average temperature in °C
    pub temp: f64,

    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: i32,
}

/// A labeled observation submitted for retraining
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrainingInput {
    #[validate(
        length(min = 1, message = "Please select a country"),
        custom = "validate_country"
    )]
    pub area: String,

    #[validate(
        length(min = 1, message = "Please select a crop type"),
        custom = "validate_crop_type"
    )]
    pub item: String,

    #[validate(range(min = 0.0, message = "Rainfall must be a non-negative number"))]
    pub rainfall: f64,

    #[validate(range(min = 0.0, message = "Pesticides must be a non-negative number"))]
    pub pesticides: f64,

    pub temp: f64,

    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: i32,

    /// Observed yield in hectograms per hectare
    #[validate(custom = "validate_positive")]
    pub yield_value: f64,
}

impl TrainingInput {
    /// The six inputs of this observation without the outcome
    pub fn features(&self) -> PredictionInput {
        PredictionInput {
            area: self.area.clone(),
            item: self.item.clone(),
            rainfall: self.rainfall,
            pesticides: self.pesticides,
            temp: self.temp,
            year: self.year,
        }
    }
}

/// Body for the service's `/info` route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoRecord {
    #[serde(flatten)]
    pub observation: TrainingInput,
    pub is_trained: bool,
}

impl From<TrainingInput> for InfoRecord {
    fn from(observation: TrainingInput) -> Self {
        Self {
            observation,
            is_trained: false,
        }
    }
}

/// Response body of `POST /predict`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_yield: f64,
}

impl PredictionResponse {
    /// Yield rounded to two decimals, the way the forms display it
    pub fn display_value(&self) -> String {
        format_predicted_yield(self.predicted_yield)
    }
}

/// Unit label shown next to a predicted yield
pub const YIELD_UNIT: &str = "hectograms / hectare";

pub fn format_predicted_yield(value: f64) -> String {
    format!("{:.2}", value)
}
