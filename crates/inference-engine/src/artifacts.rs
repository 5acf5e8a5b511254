//! Model Artifact Loading

use crate::models::{LinearRegressor, LogisticClassifier};
use crate::InferenceError;
use feature_engine::{DistrictEncoder, FeatureExtractor, StandardScaler};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

pub const RISK_MODEL_FILE: &str = "risk_model.json";
pub const FIRE_MODEL_FILE: &str = "fire_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const DISTRICT_ENCODER_FILE: &str = "district_encoder.json";

#[derive(Deserialize)]
struct EncoderArtifact {
    categories: Vec<String>,
}

/// The four artifacts a prediction needs
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub risk_model: LinearRegressor,
    pub fire_model: LogisticClassifier,
    pub scaler: StandardScaler,
    pub encoder: DistrictEncoder,
}

impl ModelBundle {
    /// Load and cross-check all artifacts from a model directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let dir = dir.as_ref();
        info!("Loading model artifacts from {}", dir.display());

        let risk_model: LinearRegressor = read_json(&dir.join(RISK_MODEL_FILE))?;
        let fire_model: LogisticClassifier = read_json(&dir.join(FIRE_MODEL_FILE))?;
        let scaler: StandardScaler = read_json(&dir.join(SCALER_FILE))?;
        let encoder: EncoderArtifact = read_json(&dir.join(DISTRICT_ENCODER_FILE))?;

        let bundle = Self {
            risk_model,
            fire_model,
            scaler,
            encoder: DistrictEncoder::new(encoder.categories),
        };
        bundle.check_dimensions()?;

        info!(
            "Models loaded: {} features, {} districts",
            bundle.scaler.dimension(),
            bundle.encoder.len()
        );
        Ok(bundle)
    }

    /// Every artifact must agree on the feature dimension
    pub fn check_dimensions(&self) -> Result<(), InferenceError> {
        let expected = FeatureExtractor::new(self.encoder.clone()).dimension();
        for (name, actual) in [
            ("scaler", self.scaler.dimension()),
            ("scaler scale", self.scaler.scale.len()),
            ("risk model", self.risk_model.weights.len()),
            ("fire model", self.fire_model.weights.len()),
        ] {
            if actual != expected {
                return Err(InferenceError::ModelLoadError(format!(
                    "{} expects {} features, encoder yields {}",
                    name, actual, expected
                )));
            }
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InferenceError> {
    debug!("Reading artifact {}", path.display());
    let file = File::open(path)
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    /// Write a consistent two-district bundle into `dir`
    pub(crate) fn write_bundle(dir: &Path) {
        // 9 base features + 2 districts
        let weights = "[0.0, 0.0, 1.0, -0.1, 0.5, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0]";
        fs::write(
            dir.join(RISK_MODEL_FILE),
            format!(r#"{{"weights": {}, "intercept": 5.0}}"#, weights),
        )
        .unwrap();
        fs::write(
            dir.join(FIRE_MODEL_FILE),
            format!(r#"{{"weights": {}, "intercept": -1.0}}"#, weights),
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            r#"{"mean": [0,0,0,0,0,0,0,0,0,0,0], "scale": [1,1,1,1,1,1,1,1,1,1,1]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(DISTRICT_ENCODER_FILE),
            r#"{"categories": ["Dang", "Kailali"]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());

        let bundle = ModelBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.encoder.categories(), &["dang", "kailali"]);
        assert_eq!(bundle.scaler.dimension(), 11);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoadError(msg) if msg.contains(RISK_MODEL_FILE)));
    }

    #[test]
    fn test_dimension_disagreement() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        fs::write(
            dir.path().join(DISTRICT_ENCODER_FILE),
            r#"{"categories": ["dang", "kailali", "surkhet"]}"#,
        )
        .unwrap();

        assert!(ModelBundle::load(dir.path()).is_err());
    }

    #[test]
    fn test_short_scaler_scale() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        fs::write(
            dir.path().join(SCALER_FILE),
            r#"{"mean": [0,0,0,0,0,0,0,0,0,0,0], "scale": [1,1,1]}"#,
        )
        .unwrap();

        let err = ModelBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoadError(msg) if msg.contains(SCALER_FILE)));
    }

    #[test]
    fn test_check_dimensions_catches_short_scale() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let mut bundle = ModelBundle::load(dir.path()).unwrap();
        bundle.scaler.scale.truncate(3);

        assert!(bundle.check_dimensions().is_err());
    }
}
