//! Crop Yield Prediction - web server
//!
//! Serves the web app's server routes: the training data proxy and the
//! reference data the forms are built from.

use std::net::SocketAddr;

use crop_yield_backend::{config::Config, create_app, AppState};
use shared::Platform;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "crop_yield_backend=debug,yield_server=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load(Platform::Web)?;

    tracing::info!("Starting Crop Yield Prediction web server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Prediction service: {}", config.prediction.base_url);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Build application
    let app = create_app(AppState::new(config));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
