//! Fire Risk Inference Engine
//!
//! Runs the pre-trained risk regressor and fire classifier. The models are
//! opaque artifacts exported from training; this crate only applies them.

mod artifacts;
mod engine;
mod models;

pub use artifacts::{ModelBundle, DISTRICT_ENCODER_FILE, FIRE_MODEL_FILE, RISK_MODEL_FILE, SCALER_FILE};
pub use engine::{InferenceEngine, InferenceResult, ModelOutput};
pub use models::{FireClassifier, LinearRegressor, LogisticClassifier, RiskRegressor};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Model produced a non-finite {0}")]
    InvalidOutput(&'static str),
}

impl From<feature_engine::FeatureError> for InferenceError {
    fn from(err: feature_engine::FeatureError) -> Self {
        match err {
            feature_engine::FeatureError::DimensionMismatch { expected, actual } => {
                InferenceError::InvalidInputShape { expected, actual }
            }
            other => InferenceError::ModelLoadError(other.to_string()),
        }
    }
}
