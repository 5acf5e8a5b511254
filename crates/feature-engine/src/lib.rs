//! Feature Engineering Engine
//!
//! Turns a location and the climate form input into the feature vector the
//! pre-trained models were fitted on, and applies the fitted scaler.

mod encoder;
mod features;
mod scaler;

pub use encoder::DistrictEncoder;
pub use features::{month_cyclic, FeatureExtractor, FeatureVector, BASE_FEATURES};
pub use scaler::StandardScaler;

use thiserror::Error;

/// Errors during feature assembly or scaling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Invalid scaler: {0}")]
    InvalidScaler(String),
}
