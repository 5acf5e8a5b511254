//! Inference Engine Implementation

use crate::artifacts::ModelBundle;
use crate::models::{FireClassifier, MockClassifier, MockRegressor, RiskRegressor};
use crate::InferenceError;
use feature_engine::{DistrictEncoder, FeatureExtractor, FeatureVector, StandardScaler};
use input_validator::{ClimateInputs, Location};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Raw outputs of the two models for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Regressor output (nominal 0-40)
    pub risk_value: f64,
    /// Classifier positive-class probability, scaled to percent
    pub fire_probability_percent: f64,
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The model outputs
    pub output: ModelOutput,
    /// Unscaled features the models were fed
    pub features: FeatureVector,
    /// Inference latency in milliseconds
    pub latency_ms: f64,
    /// Whether the rule-based stand-in produced the output
    pub mock: bool,
}

/// Applies the fire risk regressor and fire classifier to form input
pub struct InferenceEngine {
    /// Model directory (or "mock")
    model_dir: PathBuf,
    extractor: FeatureExtractor,
    scaler: StandardScaler,
    regressor: Box<dyn RiskRegressor>,
    classifier: Box<dyn FireClassifier>,
    /// Rule-based models, no artifacts
    mock_mode: bool,
}

impl InferenceEngine {
    /// Load the model artifacts from a directory
    pub fn load(model_dir: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let model_dir = model_dir.as_ref();
        let bundle = ModelBundle::load(model_dir)?;

        Ok(Self {
            model_dir: model_dir.to_path_buf(),
            extractor: FeatureExtractor::new(bundle.encoder),
            scaler: bundle.scaler,
            regressor: Box::new(bundle.risk_model),
            classifier: Box::new(bundle.fire_model),
            mock_mode: false,
        })
    }

    /// Create a mock inference engine for development and testing
    pub fn mock<I, S>(districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!("Creating mock inference engine");
        let extractor = FeatureExtractor::new(DistrictEncoder::new(districts));
        let scaler = StandardScaler::identity(extractor.dimension());

        Self {
            model_dir: PathBuf::from("mock"),
            extractor,
            scaler,
            regressor: Box::new(MockRegressor),
            classifier: Box::new(MockClassifier),
            mock_mode: true,
        }
    }

    /// Assemble an engine from caller-provided models
    pub fn with_models(
        encoder: DistrictEncoder,
        scaler: StandardScaler,
        regressor: Box<dyn RiskRegressor>,
        classifier: Box<dyn FireClassifier>,
    ) -> Result<Self, InferenceError> {
        let extractor = FeatureExtractor::new(encoder);
        let expected = extractor.dimension();
        for actual in [
            Some(scaler.dimension()),
            regressor.dimension(),
            classifier.dimension(),
        ]
        .into_iter()
        .flatten()
        {
            if actual != expected {
                return Err(InferenceError::InvalidInputShape { expected, actual });
            }
        }

        Ok(Self {
            model_dir: PathBuf::from("custom"),
            extractor,
            scaler,
            regressor,
            classifier,
            mock_mode: false,
        })
    }

    /// Run both models for one location and set of climate inputs
    pub fn predict(
        &self,
        location: &Location,
        inputs: &ClimateInputs,
    ) -> Result<InferenceResult, InferenceError> {
        let start = Instant::now();

        let features = self.extractor.extract(location, inputs);
        let scaled = self.scaler.transform_vector(&features)?;

        let risk_value = self.regressor.predict(&scaled);
        if !risk_value.is_finite() {
            return Err(InferenceError::InvalidOutput("risk value"));
        }
        let fire_probability_percent = self.classifier.predict_proba(&scaled) * 100.0;
        if !fire_probability_percent.is_finite() {
            return Err(InferenceError::InvalidOutput("fire probability"));
        }

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "Inference for {} completed in {:.3}ms: risk={:.2}, p={:.1}%",
            location.district, latency_ms, risk_value, fire_probability_percent
        );

        Ok(InferenceResult {
            output: ModelOutput {
                risk_value,
                fire_probability_percent,
            },
            features,
            latency_ms,
            mock: self.mock_mode,
        })
    }

    /// Districts the model was trained on
    pub fn districts(&self) -> &[String] {
        self.extractor.encoder().categories()
    }

    /// Check if running the rule-based stand-in
    pub fn is_mock(&self) -> bool {
        self.mock_mode
    }

    /// Get model directory
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}
