//! Fire Risk Scoring
//!
//! Combines the risk regressor output and the fire classifier probability
//! into a blended confidence and the categorical labels shown on the dashboard.

mod assessment;
mod category;

pub use assessment::{score, RiskAssessment, RISK_VALUE_CEILING};
pub use category::{ConfidenceLevel, RiskCategory};
