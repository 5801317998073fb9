//! Prediction service client
//!
//! Client for the external crop yield prediction service. Each call is a
//! single request: no retries, no backoff, no timeout beyond the transport's.

use reqwest::Client;
use serde::Serialize;
use shared::{InfoRecord, PredictionInput, PredictionResponse, TrainingEndpoint, TrainingInput};

use crate::error::{AppError, AppResult};

/// Client for the prediction service (or the web app fronting it)
#[derive(Clone)]
pub struct PredictionClient {
    base_url: String,
    http_client: Client,
}

impl PredictionClient {
    /// Create a new client rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request a yield estimate for one observation
    pub async fn predict(&self, input: &PredictionInput) -> AppResult<PredictionResponse> {
        let response = self.post_json("/predict", input).await?;

        let result: PredictionResponse = response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(predicted_yield = result.predicted_yield, "prediction received");
        Ok(result)
    }

    /// Submit a labeled observation to the given training endpoint
    ///
    /// The body shape depends on the endpoint: the web proxy takes the bare
    /// record, `/train` takes a batch, `/info` takes the record flagged as
    /// not yet trained on.
    pub async fn submit_training(
        &self,
        input: &TrainingInput,
        endpoint: TrainingEndpoint,
    ) -> AppResult<()> {
        let path = endpoint.path();
        match endpoint {
            TrainingEndpoint::WebProxy => self.post_json(path, input).await?,
            TrainingEndpoint::Train => self.post_json(path, &[input]).await?,
            TrainingEndpoint::Info => {
                self.post_json(path, &InfoRecord::from(input.clone())).await?
            }
        };
        tracing::info!(area = %input.area, item = %input.item, path, "training record submitted");
        Ok(())
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> AppResult<reqwest::Response> {
        let url = self.url(path);
        tracing::debug!(%url, "posting to prediction service");

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "prediction service unreachable");
                AppError::PredictionService(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(%url, %status, "prediction service rejected request");
            return Err(AppError::PredictionService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}
