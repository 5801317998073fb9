//! HTTP handlers for the web app's server routes

pub mod health;
pub mod reference;
pub mod training;

pub use health::health_check;
pub use reference::{get_defaults, get_reference};
pub use training::submit_training;
