//! Standard Scaling with Fitted Parameters

use crate::features::FeatureVector;
use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Z-score scaler using mean and scale fitted at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerParams")]
pub struct StandardScaler {
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature scale (standard deviation)
    pub scale: Vec<f64>,
}

/// Unchecked serialized form
#[derive(Deserialize)]
struct ScalerParams {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerParams> for StandardScaler {
    type Error = FeatureError;

    fn try_from(params: ScalerParams) -> Result<Self, Self::Error> {
        Self::new(params.mean, params.scale)
    }
}

impl StandardScaler {
    /// Create a scaler from fitted parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, FeatureError> {
        if mean.len() != scale.len() {
            return Err(FeatureError::InvalidScaler(format!(
                "mean has {} entries, scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self { mean, scale })
    }

    /// Identity scaler of a given dimension
    pub fn identity(dimension: usize) -> Self {
        Self {
            mean: vec![0.0; dimension],
            scale: vec![1.0; dimension],
        }
    }

    /// Number of features the scaler was fitted on
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Scale raw values; a zero scale is treated as 1
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, FeatureError> {
        if values.len() != self.dimension() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.dimension(),
                actual: values.len(),
            });
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            })
            .collect())
    }

    /// Scale a feature vector
    pub fn transform_vector(&self, features: &FeatureVector) -> Result<Vec<f64>, FeatureError> {
        self.transform(&features.values)
    }
}
