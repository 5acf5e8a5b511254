//! Downloadable Assessment Report

use crate::ReportError;
use chrono::NaiveDateTime;
use input_validator::{month_name, ClimateInputs, Location};
use risk_scorer::RiskAssessment;
use serde::Serialize;

/// One prediction, ready for export
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: NaiveDateTime,
    pub location: Location,
    pub inputs: ClimateInputs,
    pub assessment: RiskAssessment,
    pub notes: String,
}

/// Shortest round-trip form, keeping a trailing ".0" on whole numbers
fn number(value: f64) -> String {
    format!("{:?}", value)
}

impl AssessmentReport {
    pub fn new(
        generated_at: NaiveDateTime,
        location: Location,
        inputs: ClimateInputs,
        assessment: RiskAssessment,
        notes: impl Into<String>,
    ) -> Result<Self, ReportError> {
        if month_name(inputs.month).is_none() {
            return Err(ReportError::InvalidMonth(inputs.month));
        }
        Ok(Self {
            generated_at,
            location,
            inputs,
            assessment,
            notes: notes.into(),
        })
    }

    /// Render the key/value record
    ///
    /// `Coordinates` spans two cells and notes are not quoted. Humidity is
    /// whole-percent, so it drops the trailing ".0".
    pub fn to_csv(&self) -> String {
        let month = month_name(self.inputs.month).unwrap_or_default();
        let lines = [
            format!("Date,{}", self.generated_at.format("%Y-%m-%d %H:%M:%S")),
            format!("District,{}", self.location.district_title()),
            format!("Month,{}", month),
            format!(
                "Coordinates,{:.4},{:.4}",
                self.location.lat, self.location.lon
            ),
            format!("Precipitation (mm),{}", number(self.inputs.precipitation_mm)),
            format!("Average Temperature (°C),{}", number(self.inputs.avg_temp_c)),
            format!("Maximum Temperature (°C),{}", number(self.inputs.max_temp_c)),
            format!("Humidity (%),{}", self.inputs.humidity_pct),
            format!("Wind Speed (m/s),{}", number(self.inputs.wind_speed_ms)),
            format!("Risk Score,{:.2}", self.assessment.risk_value),
            format!("Risk Category,{}", self.assessment.risk_category),
            format!("Confidence Score,{:.2}%", self.assessment.adjusted_confidence),
            format!("Confidence Level,{}", self.assessment.confidence_level),
            format!("Notes,{}", self.notes),
        ];

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Suggested download name, `fire_risk_<district>_<YYYYMMDD>.csv`
    pub fn file_name(&self) -> String {
        format!(
            "fire_risk_{}_{}.csv",
            self.location.district,
            self.generated_at.format("%Y%m%d")
        )
    }
}
