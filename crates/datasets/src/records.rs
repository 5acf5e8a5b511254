//! Dataset Row Types

use input_validator::normalize_district;
use serde::{Deserialize, Serialize};

/// "YYYY-MM" key used for animation frames and series
pub fn year_month(year: i32, month: u32) -> String {
    format!("{}-{:02}", year, month)
}

/// One row of the filtered district-wise monthly climate data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    #[serde(rename = "DISTRICT")]
    pub district: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "MONTH")]
    pub month: u32,
    #[serde(rename = "LAT")]
    pub lat: Option<f64>,
    #[serde(rename = "LON")]
    pub lon: Option<f64>,
    #[serde(rename = "Prep")]
    pub precipitation: Option<f64>,
    #[serde(rename = "AvgTemp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "MaxTemp")]
    pub max_temp: Option<f64>,
    #[serde(rename = "Humidity")]
    pub humidity: Option<f64>,
    #[serde(rename = "WindSpeed")]
    pub wind_speed: Option<f64>,
}

impl ClimateRecord {
    /// Animation frame key
    pub fn year_month(&self) -> String {
        year_month(self.year, self.month)
    }

    /// Normalized district key
    pub fn district_key(&self) -> String {
        normalize_district(&self.district)
    }
}

/// One row of the combined fire and climate data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireClimateRecord {
    #[serde(rename = "DISTRICT")]
    pub district: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "MONTH")]
    pub month: u32,
    #[serde(rename = "LAT")]
    pub lat: Option<f64>,
    #[serde(rename = "LON")]
    pub lon: Option<f64>,
    #[serde(rename = "Prep")]
    pub precipitation: Option<f64>,
    #[serde(rename = "AvgTemp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "MaxTemp")]
    pub max_temp: Option<f64>,
    #[serde(rename = "Humidity")]
    pub humidity: Option<f64>,
    #[serde(rename = "WindSpeed")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "Fire_Count")]
    pub fire_count: Option<f64>,
    #[serde(rename = "Confidence")]
    pub confidence: Option<f64>,
    #[serde(rename = "FRP")]
    pub frp: Option<f64>,
    #[serde(rename = "Brightness", default)]
    pub brightness: Option<f64>,
}

impl FireClimateRecord {
    /// Fire count with a missing value counted as zero
    pub fn fires(&self) -> f64 {
        self.fire_count.unwrap_or(0.0)
    }

    /// Normalized district key
    pub fn district_key(&self) -> String {
        normalize_district(&self.district)
    }

    /// Both coordinates, if present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_padding() {
        assert_eq!(year_month(2014, 3), "2014-03");
        assert_eq!(year_month(2017, 11), "2017-11");
    }
}
