//! Prediction flow: drives a prediction form through one service round trip

use shared::{PredictionForm, SubmitBlocked};

use crate::external::PredictionClient;

/// Prediction service for submitting prediction forms
#[derive(Clone)]
pub struct PredictionService {
    client: PredictionClient,
}

impl PredictionService {
    pub fn new(client: PredictionClient) -> Self {
        Self { client }
    }

    /// Validate the form, call `/predict` and record the outcome on the form
    ///
    /// Only a refused start is returned as an error; a failed request ends
    /// up in the form's error indicator.
    pub async fn submit(&self, form: &mut PredictionForm) -> Result<(), SubmitBlocked> {
        let input = form.begin_submit()?;

        let result = self
            .client
            .predict(&input)
            .await
            .map(|response| response.predicted_yield)
            .map_err(|e| {
                tracing::warn!("prediction failed: {}", e);
                e.into_submission_error()
            });

        form.finish_submit(result);
        Ok(())
    }
}
