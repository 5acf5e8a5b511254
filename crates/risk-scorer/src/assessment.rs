//! Risk Assessment Scoring

use crate::category::{ConfidenceLevel, RiskCategory};
use serde::{Deserialize, Serialize};

/// Upper end of the regressor's nominal output range
pub const RISK_VALUE_CEILING: f64 = 40.0;

/// Blended view of one prediction, built per request and never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Regression output (nominal 0-40)
    pub risk_value: f64,
    /// Classifier probability of fire, in percent
    pub fire_probability: f64,
    /// `min(risk_value / 40, 1.0)`; not floored at zero
    pub risk_factor: f64,
    /// `fire_probability * (0.8 + 0.2 * risk_factor)`
    pub adjusted_confidence: f64,
    /// Category from `risk_value`
    pub risk_category: RiskCategory,
    /// Level from `adjusted_confidence`
    pub confidence_level: ConfidenceLevel,
}

/// Score a pair of model outputs.
///
/// Inputs are not clamped: a risk value above 40 saturates the risk
/// factor at 1.0, a negative one yields a negative factor.
pub fn score(risk_value: f64, fire_probability_percent: f64) -> RiskAssessment {
    let risk_factor = (risk_value / RISK_VALUE_CEILING).min(1.0);
    let adjusted_confidence = fire_probability_percent * (0.8 + 0.2 * risk_factor);

    RiskAssessment {
        risk_value,
        fire_probability: fire_probability_percent,
        risk_factor,
        adjusted_confidence,
        risk_category: RiskCategory::from_risk_value(risk_value),
        confidence_level: ConfidenceLevel::from_confidence(adjusted_confidence),
    }
}
