//! Prediction Input Types

use serde::{Deserialize, Serialize};

/// Full month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full name for a 1-based month, `None` outside 1-12
pub fn month_name(month: u32) -> Option<&'static str> {
    (1..=12)
        .contains(&month)
        .then(|| MONTH_NAMES[(month - 1) as usize])
}

/// District and its coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// District name, lower-cased and trimmed
    pub district: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Create a location, normalizing the district name
    pub fn new(district: &str, lat: f64, lon: f64) -> Self {
        Self {
            district: normalize_district(district),
            lat,
            lon,
        }
    }

    /// District name in title case ("kailali" -> "Kailali")
    pub fn district_title(&self) -> String {
        title_case(&self.district)
    }
}

/// Lower-case and trim a district name the way the datasets key them
pub fn normalize_district(name: &str) -> String {
    name.trim().to_lowercase()
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Climate parameters entered on the prediction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateInputs {
    /// Month of prediction (1-12)
    pub month: u32,
    /// Precipitation (mm)
    pub precipitation_mm: f64,
    /// Average temperature (°C)
    pub avg_temp_c: f64,
    /// Maximum temperature (°C)
    pub max_temp_c: f64,
    /// Relative humidity (%)
    pub humidity_pct: f64,
    /// Wind speed (m/s)
    pub wind_speed_ms: f64,
    /// Soil moisture (%); shown on the form, not a model feature
    pub soil_moisture_pct: Option<f64>,
}

impl Default for ClimateInputs {
    fn default() -> Self {
        Self {
            month: 1,
            precipitation_mm: 26.7,
            avg_temp_c: 27.43,
            max_temp_c: 34.93,
            humidity_pct: 30.0,
            wind_speed_ms: 2.86,
            soil_moisture_pct: Some(15.0),
        }
    }
}

impl ClimateInputs {
    /// Form defaults for a given month
    pub fn for_month(month: u32) -> Self {
        Self {
            month,
            ..Default::default()
        }
    }

    /// Full name of the input month
    pub fn month_name(&self) -> Option<&'static str> {
        month_name(self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_location_normalizes_district() {
        let loc = Location::new("  Kailali ", 28.7, 80.9);
        assert_eq!(loc.district, "kailali");
        assert_eq!(loc.district_title(), "Kailali");
    }

    #[test]
    fn test_title_case_multi_word() {
        let loc = Location::new("nawalparasi west", 27.6, 83.7);
        assert_eq!(loc.district_title(), "Nawalparasi West");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: ClimateInputs = serde_json::from_str(r#"{"month": 4}"#).unwrap();
        assert_eq!(inputs.month, 4);
        assert_eq!(inputs.precipitation_mm, 26.7);
        assert_eq!(inputs.soil_moisture_pct, Some(15.0));
    }
}
