//! Raw form values and their coercion into wire types

use chrono::{Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{PredictionInput, TrainingInput};
use crate::types::{FormKind, Platform};
use crate::validation::FieldErrors;

/// A field of the Yield Observation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Area,
    Item,
    Rainfall,
    Pesticides,
    Temp,
    Year,
    YieldValue,
}

impl Field {
    pub const PREDICTION: [Field; 6] = [
        Field::Area,
        Field::Item,
        Field::Rainfall,
        Field::Pesticides,
        Field::Temp,
        Field::Year,
    ];

    /// JSON key of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Area => "area",
            Field::Item => "item",
            Field::Rainfall => "rainfall",
            Field::Pesticides => "pesticides",
            Field::Temp => "temp",
            Field::Year => "year",
            Field::YieldValue => "yield_value",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Area => "Country",
            Field::Item => "Crop Type",
            Field::Rainfall => "Rainfall (mm)",
            Field::Pesticides => "Pesticides (tonnes)",
            Field::Temp => "Temperature (°C)",
            Field::Year => "Year",
            Field::YieldValue => "Yield Value (hg/ha)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PREDICTION
            .iter()
            .chain(std::iter::once(&Field::YieldValue))
            .find(|f| f.as_str() == name)
            .copied()
    }

    /// Message for a value that cannot be read as a number
    fn not_a_number(&self) -> &'static str {
        match self {
            Field::Rainfall => "Rainfall must be a non-negative number",
            Field::Pesticides => "Pesticides must be a non-negative number",
            Field::Temp => "Temperature must be a number",
            Field::Year => "Year must be a whole number",
            Field::YieldValue => "Yield value must be a positive number",
            Field::Area => "Please select a country",
            Field::Item => "Please select a crop type",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values as typed into the form, before coercion
///
/// Each field reads from a JSON string or number; `null` and missing
/// fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    #[serde(deserialize_with = "text_or_number")]
    pub area: String,
    #[serde(deserialize_with = "text_or_number")]
    pub item: String,
    #[serde(deserialize_with = "text_or_number")]
    pub rainfall: String,
    #[serde(deserialize_with = "text_or_number")]
    pub pesticides: String,
    #[serde(deserialize_with = "text_or_number")]
    pub temp: String,
    #[serde(deserialize_with = "text_or_number")]
    pub year: String,
    /// Only present on the training form
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    pub yield_value: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Text(String),
    Number(f64),
}

impl From<RawInput> for String {
    fn from(raw: RawInput) -> Self {
        match raw {
            RawInput::Text(text) => text,
            RawInput::Number(value) => value.to_string(),
        }
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<RawInput>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn optional_text_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawInput>::deserialize(deserializer)?.map(String::from))
}

impl FormValues {
    /// Pre-filled values of a form on the given platform
    pub fn defaults(platform: Platform, kind: FormKind) -> Self {
        let year = Utc::now().year().to_string();
        match (platform, kind) {
            (Platform::Mobile, FormKind::Training) => Self {
                area: "Albania".into(),
                item: "Maize".into(),
                rainfall: "1485".into(),
                pesticides: "121".into(),
                temp: "16".into(),
                year,
                yield_value: Some("36613".into()),
            },
            (_, kind) => Self {
                area: "India".into(),
                item: "Wheat".into(),
                rainfall: "150".into(),
                pesticides: "10".into(),
                temp: "25".into(),
                year,
                yield_value: (kind == FormKind::Training).then(|| "5".into()),
            },
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Area => Some(&self.area),
            Field::Item => Some(&self.item),
            Field::Rainfall => Some(&self.rainfall),
            Field::Pesticides => Some(&self.pesticides),
            Field::Temp => Some(&self.temp),
            Field::Year => Some(&self.year),
            Field::YieldValue => self.yield_value.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Area => self.area = value,
            Field::Item => self.item = value,
            Field::Rainfall => self.rainfall = value,
            Field::Pesticides => self.pesticides = value,
            Field::Temp => self.temp = value,
            Field::Year => self.year = value,
            Field::YieldValue => self.yield_value = Some(value),
        }
    }

    /// Coerce the six prediction inputs
    ///
    /// `area` and `item` pass through untouched and must match the
    /// reference lists exactly. Fields that fail to coerce are reported in the returned errors and
    /// replaced by a neutral placeholder so the remaining fields can still
    /// be checked against the schema.
    pub fn coerce_prediction(&self, errors: &mut FieldErrors) -> PredictionInput {
        PredictionInput {
            area: self.area.clone(),
            item: self.item.clone(),
            rainfall: coerce_number(Field::Rainfall, &self.rainfall, errors),
            pesticides: coerce_number(Field::Pesticides, &self.pesticides, errors),
            temp: coerce_number(Field::Temp, &self.temp, errors),
            year: coerce_year(&self.year, errors),
        }
    }

    pub fn coerce_training(&self, errors: &mut FieldErrors) -> TrainingInput {
        let features = self.coerce_prediction(errors);
        let yield_value = match &self.yield_value {
            Some(raw) => coerce_number(Field::YieldValue, raw, errors),
            None => {
                errors.insert(Field::YieldValue, "Yield value is required");
                0.0
            }
        };
        TrainingInput {
            area: features.area,
            item: features.item,
            rainfall: features.rainfall,
            pesticides: features.pesticides,
            temp: features.temp,
            year: features.year,
            yield_value,
        }
    }
}

impl From<&PredictionInput> for FormValues {
    fn from(input: &PredictionInput) -> Self {
        Self {
            area: input.area.clone(),
            item: input.item.clone(),
            rainfall: input.rainfall.to_string(),
            pesticides: input.pesticides.to_string(),
            temp: input.temp.to_string(),
            year: input.year.to_string(),
            yield_value: None,
        }
    }
}

impl From<&TrainingInput> for FormValues {
    fn from(input: &TrainingInput) -> Self {
        Self {
            yield_value: Some(input.yield_value.to_string()),
            ..Self::from(&input.features())
        }
    }
}

fn coerce_number(field: Field, raw: &str, errors: &mut FieldErrors) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            errors.insert(field, field.not_a_number());
            0.0
        }
    }
}

fn coerce_year(raw: &str, errors: &mut FieldErrors) -> i32 {
    let value = coerce_number(Field::Year, raw, errors);
    if value.fract() != 0.0 {
        errors.insert(Field::Year, Field::Year.not_a_number());
        // Placeholder inside the accepted range
        return 2000;
    }
    if errors.get(Field::Year).is_some() {
        return 2000;
    }
    // Saturating cast; out-of-range years are caught by the schema
    value as i32
}
