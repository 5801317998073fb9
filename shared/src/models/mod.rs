//! Domain models for the crop yield clients

mod form;
mod observation;

pub use form::*;
pub use observation::*;
