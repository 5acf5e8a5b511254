//! Feature Vector Assembly

use crate::encoder::DistrictEncoder;
use input_validator::{ClimateInputs, Location};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Numeric features preceding the one-hot district columns, in model order
pub const BASE_FEATURES: [&str; 9] = [
    "Prep",
    "AvgTemp",
    "MaxTemp",
    "Humidity",
    "WindSpeed",
    "Month_sin",
    "Month_cos",
    "LAT",
    "LON",
];

/// Cyclical encoding of a 1-based month: `(sin(2πm/12), cos(2πm/12))`
pub fn month_cyclic(month: u32) -> (f64, f64) {
    let angle = 2.0 * PI * f64::from(month) / 12.0;
    (angle.sin(), angle.cos())
}

/// Feature vector for ML inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature names, parallel to `values`
    pub names: Vec<String>,
    /// Raw feature values
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by feature name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }
}

/// Builds feature vectors against a fixed district encoding
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    encoder: DistrictEncoder,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(encoder: DistrictEncoder) -> Self {
        Self { encoder }
    }

    /// District encoder in use
    pub fn encoder(&self) -> &DistrictEncoder {
        &self.encoder
    }

    /// Total feature dimension
    pub fn dimension(&self) -> usize {
        BASE_FEATURES.len() + self.encoder.len()
    }

    /// Feature names in model order
    pub fn feature_names(&self) -> Vec<String> {
        BASE_FEATURES
            .iter()
            .map(|s| s.to_string())
            .chain(self.encoder.feature_names())
            .collect()
    }

    /// Extract features for one prediction request
    pub fn extract(&self, location: &Location, inputs: &ClimateInputs) -> FeatureVector {
        let (month_sin, month_cos) = month_cyclic(inputs.month);

        let mut values = Vec::with_capacity(self.dimension());
        values.extend_from_slice(&[
            inputs.precipitation_mm,
            inputs.avg_temp_c,
            inputs.max_temp_c,
            inputs.humidity_pct,
            inputs.wind_speed_ms,
            month_sin,
            month_cos,
            location.lat,
            location.lon,
        ]);
        values.extend(self.encoder.encode(&location.district));

        if !self.encoder.contains(&location.district) {
            debug!("District '{}' not in encoder categories", location.district);
        }

        FeatureVector {
            names: self.feature_names(),
            values,
        }
    }
}
