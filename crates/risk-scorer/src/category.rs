//! Risk and Confidence Categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category derived from the regression risk value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// risk value below 15
    Low,
    /// risk value in [15, 25)
    Moderate,
    /// risk value in [25, 35)
    High,
    /// risk value 35 and above
    Extreme,
}

impl RiskCategory {
    /// Classify a risk value (nominal range 0-40)
    pub fn from_risk_value(risk_value: f64) -> Self {
        if risk_value < 15.0 {
            RiskCategory::Low
        } else if risk_value < 25.0 {
            RiskCategory::Moderate
        } else if risk_value < 35.0 {
            RiskCategory::High
        } else {
            RiskCategory::Extreme
        }
    }

    /// Get display label
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::Extreme => "Extreme",
        }
    }

    /// Get the badge colour used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Low => "#2E7D32",
            RiskCategory::Moderate => "#F57F17",
            RiskCategory::High => "#E65100",
            RiskCategory::Extreme => "#B71C1C",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence level derived from the adjusted confidence percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ConfidenceLevel {
    /// Classify an adjusted confidence percentage
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < 20.0 {
            ConfidenceLevel::VeryLow
        } else if confidence < 40.0 {
            ConfidenceLevel::Low
        } else if confidence < 60.0 {
            ConfidenceLevel::Moderate
        } else if confidence < 80.0 {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::VeryHigh
        }
    }

    /// Get display label
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "Very Low",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Moderate => "Moderate",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::VeryHigh => "Very High",
        }
    }

    /// Get the badge colour used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "#0D47A1",
            ConfidenceLevel::Low => "#006064",
            ConfidenceLevel::Moderate => "#F57F17",
            ConfidenceLevel::High => "#E65100",
            ConfidenceLevel::VeryHigh => "#B71C1C",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_category_boundaries() {
        assert_eq!(RiskCategory::from_risk_value(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_risk_value(14.999), RiskCategory::Low);
        assert_eq!(RiskCategory::from_risk_value(15.0), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_risk_value(24.999), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_risk_value(25.0), RiskCategory::High);
        assert_eq!(RiskCategory::from_risk_value(34.999), RiskCategory::High);
        assert_eq!(RiskCategory::from_risk_value(35.0), RiskCategory::Extreme);
        assert_eq!(RiskCategory::from_risk_value(120.0), RiskCategory::Extreme);
    }

    #[test]
    fn test_negative_risk_is_low() {
        assert_eq!(RiskCategory::from_risk_value(-5.0), RiskCategory::Low);
    }

    #[test]
    fn test_confidence_level_boundaries() {
        assert_eq!(ConfidenceLevel::from_confidence(19.999), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_confidence(20.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(39.9), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(40.0), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_confidence(60.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(79.99), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(80.0), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ConfidenceLevel::VeryLow.to_string(), "Very Low");
        assert_eq!(ConfidenceLevel::VeryHigh.as_str(), "Very High");
        assert_eq!(RiskCategory::Extreme.to_string(), "Extreme");
    }

    #[test]
    fn test_serde_labels_match_display() {
        let json = serde_json::to_string(&ConfidenceLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
        let json = serde_json::to_string(&RiskCategory::Moderate).unwrap();
        assert_eq!(json, "\"Moderate\"");
    }
}
