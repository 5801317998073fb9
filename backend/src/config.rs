//! Configuration management for the crop yield clients
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with the platform prefix
//!    (YIELD_WEB__ or YIELD_MOBILE__), e.g. `YIELD_WEB__WEB_APP__URL`

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Platform, TrainingEndpoint};

/// Base URL used when none is configured (the service's local dev port)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Address of the web app's own server routes when none is configured
pub const DEFAULT_WEB_APP_URL: &str = "http://localhost:3000";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Platform whose contract the process speaks
    pub platform: Platform,

    /// Server configuration (web only)
    pub server: ServerConfig,

    /// Prediction service configuration
    pub prediction: PredictionConfig,

    /// Where clients reach the web app's `/api` routes
    pub web_app: WebAppConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Root address of the prediction service
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebAppConfig {
    /// Root address of the running web server
    pub url: String,
}

impl Config {
    /// Load configuration for a platform from files and environment variables
    pub fn load(platform: Platform) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("YIELD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("platform", platform.code())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("prediction.base_url", DEFAULT_BASE_URL)?
            .set_default("web_app.url", DEFAULT_WEB_APP_URL)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables
            .add_source(
                Environment::with_prefix(platform.env_prefix())
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        // The prefix decides the platform, not a stray file entry
        config.platform = platform;
        Ok(config)
    }

    /// Replace the configured base URL, e.g. from a command-line flag
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.prediction.base_url = base_url.into();
        self
    }

    pub fn with_web_app_url(mut self, url: impl Into<String>) -> Self {
        self.web_app.url = url.into();
        self
    }

    /// Root address the platform's training form submits to
    ///
    /// The web form goes through the web server's `/api/train` proxy; the
    /// mobile form talks to the prediction service directly.
    pub fn training_base_url(&self) -> &str {
        match self.platform.training_endpoint() {
            TrainingEndpoint::WebProxy => &self.web_app.url,
            TrainingEndpoint::Train | TrainingEndpoint::Info => &self.prediction.base_url,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            platform: Platform::Web,
            server: ServerConfig::default(),
            prediction: PredictionConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            web_app: WebAppConfig {
                url: DEFAULT_WEB_APP_URL.to_string(),
            },
        }
    }
}
