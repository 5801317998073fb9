//! WebAssembly module for the crop yield web form
//!
//! Provides client-side computation for:
//! - Coercion and validation of raw form input
//! - Building request payloads for the prediction service
//! - Formatting the predicted yield
//! - Picker options and form defaults

use serde::Serialize;
use serde_json::Value;
use shared::{
    parse_prediction, parse_training, FieldErrors, FormKind, FormValues, InfoRecord, Platform,
    PredictionResponse, COUNTRIES, CROP_TYPES,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("crop yield form module loaded"));
}

/// Outcome of validating a form, handed back to JavaScript as JSON
#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl ValidationReport {
    fn from_result<T: Serialize>(result: Result<T, FieldErrors>) -> Result<String, String> {
        let report = match result {
            Ok(payload) => ValidationReport {
                valid: true,
                errors: FieldErrors::default(),
                payload: Some(serde_json::to_value(payload).map_err(|e| e.to_string())?),
            },
            Err(errors) => ValidationReport {
                valid: false,
                errors,
                payload: None,
            },
        };
        serde_json::to_string(&report).map_err(|e| e.to_string())
    }
}

fn read_values(values_json: &str) -> Result<FormValues, String> {
    serde_json::from_str(values_json).map_err(|e| format!("Invalid form JSON: {}", e))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

// ============================================================================
// Inner implementations (target independent)
// ============================================================================

fn prediction_report(values_json: &str) -> Result<String, String> {
    let values = read_values(values_json)?;
    ValidationReport::from_result(parse_prediction(&values))
}

fn training_report(values_json: &str) -> Result<String, String> {
    let values = read_values(values_json)?;
    ValidationReport::from_result(parse_training(&values))
}

fn info_payload(values_json: &str) -> Result<String, String> {
    let values = read_values(values_json)?;
    let input = parse_training(&values).map_err(|errors| errors.to_string())?;
    serde_json::to_string(&InfoRecord::from(input)).map_err(|e| e.to_string())
}

fn defaults_json(platform: &str, form: &str) -> Result<String, String> {
    let platform: Platform = platform.parse()?;
    let kind = FormKind::from_name(form).ok_or_else(|| format!("Unknown form '{}'", form))?;
    serde_json::to_string(&FormValues::defaults(platform, kind)).map_err(|e| e.to_string())
}

fn predicted_yield_display(body: &str) -> Result<String, String> {
    let response: PredictionResponse =
        serde_json::from_str(body).map_err(|e| format!("Invalid prediction response: {}", e))?;
    Ok(response.display_value())
}

// ============================================================================
// Exports
// ============================================================================

/// Validate raw prediction form values given as JSON
///
/// Each field may be a string (as typed) or a number; missing or `null`
/// fields are reported as required. Returns `{"valid": bool, "errors": {field: message}, "payload": {...}}`;
/// the payload is the `/predict` body when valid.
#[wasm_bindgen]
pub fn validate_prediction_form(values_json: &str) -> Result<String, JsValue> {
    prediction_report(values_json).map_err(to_js_error)
}

/// Validate raw training form values given as JSON
#[wasm_bindgen]
pub fn validate_training_form(values_json: &str) -> Result<String, JsValue> {
    training_report(values_json).map_err(to_js_error)
}

/// Build the `/info` body (record plus `is_trained: false`)
#[wasm_bindgen]
pub fn build_info_payload(values_json: &str) -> Result<String, JsValue> {
    info_payload(values_json).map_err(to_js_error)
}

/// Format a predicted yield to two decimals
#[wasm_bindgen]
pub fn format_prediction(value: f64) -> String {
    shared::format_predicted_yield(value)
}

/// Read a `/predict` response body and format its yield
#[wasm_bindgen]
pub fn display_prediction_response(body: &str) -> Result<String, JsValue> {
    predicted_yield_display(body).map_err(to_js_error)
}

/// Default values of a form (`prediction` or `training`) on a platform
#[wasm_bindgen]
pub fn default_form_values(platform: &str, form: &str) -> Result<String, JsValue> {
    defaults_json(platform, form).map_err(to_js_error)
}

/// Country picker options
#[wasm_bindgen]
pub fn country_options() -> js_sys::Array {
    COUNTRIES.iter().map(|c| JsValue::from_str(c)).collect()
}

/// Crop type picker options
#[wasm_bindgen]
pub fn crop_type_options() -> js_sys::Array {
    CROP_TYPES.iter().map(|c| JsValue::from_str(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn web_training_values() -> Value {
        json!({
            "area": "India",
            "item": "Wheat",
            "rainfall": "150",
            "pesticides": "10",
            "temp": "25",
            "year": "2023",
            "yield_value": "5"
        })
    }

    #[test]
    fn test_valid_prediction_report_carries_payload() {
        let report: Value =
            serde_json::from_str(&prediction_report(&web_training_values().to_string()).unwrap())
                .unwrap();
        assert_eq!(report["valid"], json!(true));
        assert_eq!(report["errors"], json!({}));
        assert_eq!(
            report["payload"],
            json!({
                "area": "India",
                "item": "Wheat",
                "rainfall": 150.0,
                "pesticides": 10.0,
                "temp": 25.0,
                "year": 2023
            })
        );
    }

    #[test]
    fn test_invalid_training_report_lists_fields() {
        let mut values = web_training_values();
        values["item"] = json!("");
        values["yield_value"] = json!("-3");
        let report: Value =
            serde_json::from_str(&training_report(&values.to_string()).unwrap()).unwrap();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(report["errors"]["item"], json!("Please select a crop type"));
        assert_eq!(
            report["errors"]["yield_value"],
            json!("Yield value must be a positive number")
        );
        assert!(report.get("payload").is_none());
    }

    #[test]
    fn test_missing_fields_are_reported_not_rejected() {
        let report: Value = serde_json::from_str(&prediction_report("{}").unwrap()).unwrap();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(report["errors"]["area"], json!("Please select a country"));
        assert_eq!(report["errors"]["year"], json!("Year is required"));
    }

    #[test]
    fn test_numeric_form_values_are_validated() {
        let values = json!({
            "area": "India",
            "item": "Wheat",
            "rainfall": 150,
            "pesticides": -1,
            "temp": 25.5,
            "year": 2020.5
        });
        let report: Value =
            serde_json::from_str(&prediction_report(&values.to_string()).unwrap()).unwrap();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(
            report["errors"]["pesticides"],
            json!("Pesticides must be a non-negative number")
        );
        assert_eq!(report["errors"]["year"], json!("Year must be a whole number"));
        assert!(report["errors"].get("rainfall").is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(prediction_report("not json").is_err());
    }

    #[test]
    fn test_info_payload() {
        let payload: Value =
            serde_json::from_str(&info_payload(&web_training_values().to_string()).unwrap())
                .unwrap();
        assert_eq!(payload["is_trained"], json!(false));
        assert_eq!(payload["yield_value"], json!(5.0));
        assert_eq!(payload.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_defaults_json() {
        let defaults: Value =
            serde_json::from_str(&defaults_json("mobile", "training").unwrap()).unwrap();
        assert_eq!(defaults["area"], json!("Albania"));
        assert!(defaults_json("mobile", "info").is_err());
        assert!(defaults_json("desktop", "training").is_err());
    }

    #[test]
    fn test_prediction_display() {
        assert_eq!(format_prediction(3456.78), "3456.78");
        assert_eq!(
            predicted_yield_display(r#"{"predicted_yield": 3456.78}"#).unwrap(),
            "3456.78"
        );
        assert!(predicted_yield_display(r#"{"error": "model not loaded"}"#).is_err());
    }
}
