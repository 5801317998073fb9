//! Common types used across the clients

use serde::{Deserialize, Serialize};

/// Client platform a form belongs to
///
/// The two platforms share one schema but differ in their default values,
/// configuration prefix and the endpoint training records are sent to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Mobile,
}

impl Platform {
    pub fn code(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Mobile => "mobile",
        }
    }

    /// Environment variable prefix used for this platform's configuration
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Platform::Web => "YIELD_WEB",
            Platform::Mobile => "YIELD_MOBILE",
        }
    }

    /// Endpoint the training form of this platform submits to
    pub fn training_endpoint(&self) -> TrainingEndpoint {
        match self {
            Platform::Web => TrainingEndpoint::WebProxy,
            Platform::Mobile => TrainingEndpoint::Info,
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Platform::Web),
            "mobile" => Ok(Platform::Mobile),
            other => Err(format!("unknown platform '{}', expected web or mobile", other)),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Which of the two forms a set of values belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Prediction,
    Training,
}

impl FormKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "prediction" => Some(FormKind::Prediction),
            "training" => Some(FormKind::Training),
            _ => None,
        }
    }
}

/// Destination of a training submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingEndpoint {
    /// The web app's local proxy route; body is a single record
    WebProxy,
    /// The prediction service's batch training route; body is an array of records
    Train,
    /// The prediction service's record intake route; body carries `is_trained: false`
    Info,
}

impl TrainingEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            TrainingEndpoint::WebProxy => "/api/train",
            TrainingEndpoint::Train => "/train",
            TrainingEndpoint::Info => "/info",
        }
    }
}
