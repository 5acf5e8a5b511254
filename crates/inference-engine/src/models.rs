//! Model Interfaces and Linear Model Artifacts

use serde::{Deserialize, Serialize};

/// Regressor producing the fire risk value (nominal 0-40)
pub trait RiskRegressor: Send + Sync {
    /// Predict from scaled features
    fn predict(&self, features: &[f64]) -> f64;

    /// Expected feature dimension, if fixed
    fn dimension(&self) -> Option<usize> {
        None
    }
}

/// Classifier producing the probability of fire occurrence (0-1)
pub trait FireClassifier: Send + Sync {
    /// Probability of the positive class from scaled features
    fn predict_proba(&self, features: &[f64]) -> f64;

    /// Expected feature dimension, if fixed
    fn dimension(&self) -> Option<usize> {
        None
    }
}

fn dot(weights: &[f64], features: &[f64]) -> f64 {
    weights.iter().zip(features).map(|(w, x)| w * x).sum()
}

/// Linear regression exported as coefficients and intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl RiskRegressor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> f64 {
        dot(&self.weights, features) + self.intercept
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

/// Logistic regression exported as coefficients and intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl FireClassifier for LogisticClassifier {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        let z = dot(&self.weights, features) + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

/// Rule-based stand-in used when no artifacts are available.
///
/// Reads unscaled base features: Prep, AvgTemp, MaxTemp, Humidity, WindSpeed.
pub(crate) struct MockRegressor;

impl RiskRegressor for MockRegressor {
    fn predict(&self, features: &[f64]) -> f64 {
        let [prep, _avg, max_temp, humidity, wind] = base(features);
        (0.8 * max_temp - 0.2 * humidity + 2.0 * wind - 0.05 * prep).clamp(0.0, 40.0)
    }
}

pub(crate) struct MockClassifier;

impl FireClassifier for MockClassifier {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        let [prep, avg_temp, _max, humidity, wind] = base(features);
        let z = 0.15 * (avg_temp - 20.0) - 0.06 * (humidity - 40.0) + 0.3 * wind - 0.02 * prep;
        1.0 / (1.0 + (-z).exp())
    }
}

fn base(features: &[f64]) -> [f64; 5] {
    let mut out = [0.0; 5];
    for (slot, value) in out.iter_mut().zip(features) {
        *slot = *value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_regressor() {
        let model = LinearRegressor {
            weights: vec![2.0, -1.0],
            intercept: 5.0,
        };
        assert_eq!(model.predict(&[3.0, 4.0]), 7.0);
        assert_eq!(RiskRegressor::dimension(&model), Some(2));
    }

    #[test]
    fn test_logistic_midpoint() {
        let model = LogisticClassifier {
            weights: vec![1.0],
            intercept: 0.0,
        };
        assert!((model.predict_proba(&[0.0]) - 0.5).abs() < 1e-12);
        assert!(model.predict_proba(&[10.0]) > 0.99);
    }

    #[test]
    fn test_mock_dry_hot_is_riskier() {
        let dry_hot = [0.0, 32.0, 40.0, 10.0, 6.0];
        let wet_cool = [300.0, 12.0, 16.0, 90.0, 1.0];
        assert!(MockRegressor.predict(&dry_hot) > MockRegressor.predict(&wet_cool));
        assert!(MockClassifier.predict_proba(&dry_hot) > MockClassifier.predict_proba(&wet_cool));
    }

    #[test]
    fn test_mock_regressor_in_nominal_range() {
        let extreme = [0.0, 45.0, 60.0, 0.0, 50.0];
        assert_eq!(MockRegressor.predict(&extreme), 40.0);
    }
}
