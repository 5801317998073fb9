//! Submission services for the crop yield clients

pub mod prediction;
pub mod training;

pub use prediction::PredictionService;
pub use training::TrainingService;
