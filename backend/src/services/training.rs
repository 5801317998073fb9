//! Training flow: submits labeled observations for future retraining

use shared::{Platform, SubmitBlocked, TrainingEndpoint, TrainingForm, TrainingInput};
use validator::Validate;

use crate::error::AppResult;
use crate::external::PredictionClient;

/// Training service for submitting training forms and proxying records
#[derive(Clone)]
pub struct TrainingService {
    client: PredictionClient,
    endpoint: TrainingEndpoint,
}

impl TrainingService {
    /// Service submitting to the platform's training endpoint
    pub fn new(client: PredictionClient, platform: Platform) -> Self {
        Self::with_endpoint(client, platform.training_endpoint())
    }

    pub fn with_endpoint(client: PredictionClient, endpoint: TrainingEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> TrainingEndpoint {
        self.endpoint
    }

    /// Validate the form, submit it and record the outcome on the form
    pub async fn submit(&self, form: &mut TrainingForm) -> Result<(), SubmitBlocked> {
        let input = form.begin_submit()?;

        let result = self
            .client
            .submit_training(&input, self.endpoint)
            .await
            .map_err(|e| {
                tracing::warn!("training submission failed: {}", e);
                e.into_submission_error()
            });

        form.finish_submit(result);
        Ok(())
    }

    /// Re-validate a record received by the web app and pass it upstream
    pub async fn forward(&self, input: &TrainingInput) -> AppResult<()> {
        input.validate()?;
        self.client.submit_training(input, self.endpoint).await
    }
}
