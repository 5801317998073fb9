//! Route definitions for the web app's server side

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Training records from the web form, proxied to the service
        .route("/train", post(handlers::submit_training))
        // Picker options and form defaults
        .route("/reference", get(handlers::get_reference))
        .route("/defaults/:form", get(handlers::get_defaults))
}
