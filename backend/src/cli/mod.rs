//! Terminal client
//!
//! Fills the same forms the apps show from command-line flags and submits
//! them with the chosen platform's contract:
//!
//! - `predict` posts to `{prediction}/predict` on either platform
//! - `train` posts to `{web_app}/api/train` (web) or `{prediction}/info` (mobile)

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use shared::{
    FieldErrors, FormKind, FormValues, Platform, PredictionForm, SubmitBlocked, TrainingForm,
    COUNTRIES, CROP_TYPES, YIELD_UNIT,
};

use crate::config::Config;
use crate::external::PredictionClient;
use crate::services::{PredictionService, TrainingService};
use commands::{Commands, ObservationArgs, ReferenceList, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "yield-cli",
    version,
    about = "Predict crop yields or submit training data to improve the model."
)]
pub struct Cli {
    /// Platform contract to use (web or mobile)
    #[arg(long, global = true, default_value_t = Platform::Web)]
    pub platform: Platform,

    /// Prediction service address; overrides the platform's configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Web app address used by web training submissions
    #[arg(long, global = true)]
    pub app_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Predict(args) => self.run_predict(args).await,
            Commands::Train(args) => self.run_train(args).await,
            Commands::Reference(args) => {
                println!("{}", render_reference(args.list));
                Ok(())
            }
        }
    }

    fn config(&self) -> Result<Config> {
        Ok(self.apply_overrides(Config::load(self.platform)?))
    }

    /// Command-line addresses take precedence over loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(app_url) = &self.app_url {
            config = config.with_web_app_url(app_url.clone());
        }
        config
    }

    async fn run_predict(&self, args: &ObservationArgs) -> Result<()> {
        let config = self.config()?;
        tracing::info!(
            platform = %self.platform,
            base_url = %config.prediction.base_url,
            "using prediction service"
        );
        let service = PredictionService::new(PredictionClient::new(config.prediction.base_url));

        let mut values = FormValues::defaults(self.platform, FormKind::Prediction);
        args.apply_to(&mut values);
        let mut form = PredictionForm::with_values(values);

        if let Err(blocked) = service.submit(&mut form).await {
            return report_blocked(blocked);
        }
        match form.displayed_prediction() {
            Some(_) => {
                println!("{}", render_prediction(&form));
                Ok(())
            }
            None => bail!("{}", form.error().unwrap_or("No prediction returned")),
        }
    }

    async fn run_train(&self, args: &TrainArgs) -> Result<()> {
        let config = self.config()?;
        let base_url = config.training_base_url();
        tracing::info!(platform = %self.platform, %base_url, "submitting training data");
        let service = TrainingService::new(PredictionClient::new(base_url), self.platform);

        let mut values = FormValues::defaults(self.platform, FormKind::Training);
        args.apply_to(&mut values);
        let mut form = TrainingForm::with_values(values);

        if let Err(blocked) = service.submit(&mut form).await {
            return report_blocked(blocked);
        }
        if let Some(error) = form.error() {
            bail!("{}", error);
        }
        println!("{}", render_training_success(&form));
        Ok(())
    }
}

fn report_blocked(blocked: SubmitBlocked) -> Result<()> {
    if let SubmitBlocked::Invalid(errors) = &blocked {
        eprintln!("{}", render_field_errors(errors));
    }
    bail!("{}", blocked)
}

pub fn render_prediction(form: &PredictionForm) -> String {
    match form.displayed_prediction() {
        Some(value) => format!("Predicted Yield: {} ({})", value, YIELD_UNIT),
        None => String::new(),
    }
}

pub fn render_training_success(form: &TrainingForm) -> String {
    let values = form.values();
    format!(
        "Training data submitted: {} / {} ({}) yield {}",
        values.area,
        values.item,
        values.year,
        values.yield_value.as_deref().unwrap_or("-")
    )
}

/// One `Label: message` line per invalid field, in form order
pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field.label(), message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_reference(list: ReferenceList) -> String {
    match list {
        ReferenceList::Countries => COUNTRIES.join("\n"),
        ReferenceList::Crops => CROP_TYPES.join("\n"),
    }
}
