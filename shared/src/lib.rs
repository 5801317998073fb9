//! Shared contract of the crop yield clients
//!
//! This crate contains the Yield Observation types, reference data and the
//! validation schema used by the web backend, the terminal client and the
//! browser bindings (via WASM).

pub mod forms;
pub mod models;
pub mod reference;
pub mod types;
pub mod validation;

pub use forms::*;
pub use models::*;
pub use reference::*;
pub use types::*;
pub use validation::*;
