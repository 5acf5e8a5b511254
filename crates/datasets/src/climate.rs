//! Climate Data Views

use crate::loader::load_climate;
use crate::records::ClimateRecord;
use crate::stats::{mean_of, quantile, SummaryStatistics};
use crate::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Climate variable selectable on the map and analysis views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariable {
    MaxTemperature,
    Temperature,
    Humidity,
    Precipitation,
    WindSpeed,
}

impl ClimateVariable {
    pub const ALL: [ClimateVariable; 5] = [
        ClimateVariable::MaxTemperature,
        ClimateVariable::Temperature,
        ClimateVariable::Humidity,
        ClimateVariable::Precipitation,
        ClimateVariable::WindSpeed,
    ];

    /// CSV column name
    pub fn column(&self) -> &'static str {
        match self {
            ClimateVariable::MaxTemperature => "MaxTemp",
            ClimateVariable::Temperature => "AvgTemp",
            ClimateVariable::Humidity => "Humidity",
            ClimateVariable::Precipitation => "Prep",
            ClimateVariable::WindSpeed => "WindSpeed",
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            ClimateVariable::MaxTemperature | ClimateVariable::Temperature => "°C",
            ClimateVariable::Humidity => "%",
            ClimateVariable::Precipitation => "mm",
            ClimateVariable::WindSpeed => "m/s",
        }
    }

    /// Path segment form
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateVariable::MaxTemperature => "max_temperature",
            ClimateVariable::Temperature => "temperature",
            ClimateVariable::Humidity => "humidity",
            ClimateVariable::Precipitation => "precipitation",
            ClimateVariable::WindSpeed => "wind_speed",
        }
    }

    fn value(&self, record: &ClimateRecord) -> Option<f64> {
        match self {
            ClimateVariable::MaxTemperature => record.max_temp,
            ClimateVariable::Temperature => record.avg_temp,
            ClimateVariable::Humidity => record.humidity,
            ClimateVariable::Precipitation => record.precipitation,
            ClimateVariable::WindSpeed => record.wind_speed,
        }
    }
}

impl FromStr for ClimateVariable {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        ClimateVariable::ALL
            .into_iter()
            .find(|v| v.as_str() == key || v.column().to_lowercase() == key)
            .ok_or_else(|| DatasetError::UnknownVariable(s.to_string()))
    }
}

/// A district's value in one animation frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictValue {
    pub district: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub value: f64,
}

/// Mean of a variable for one month of one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthYearCell {
    pub month: u32,
    pub year: i32,
    pub value: f64,
}

/// Box-plot statistics for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub month: u32,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

/// District-wise monthly climate rows
#[derive(Debug, Clone, Default)]
pub struct ClimateDataset {
    records: Vec<ClimateRecord>,
}

impl ClimateDataset {
    pub fn new(records: Vec<ClimateRecord>) -> Self {
        Self { records }
    }

    /// Load from the filtered climate CSV
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dataset = Self::new(load_climate(path)?);
        info!("Climate dataset ready: {} rows", dataset.len());
        Ok(dataset)
    }

    pub fn records(&self) -> &[ClimateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per year-month frames of district values, keyed "YYYY-MM"
    pub fn frames(&self, variable: ClimateVariable) -> BTreeMap<String, Vec<DistrictValue>> {
        let mut frames: BTreeMap<String, Vec<DistrictValue>> = BTreeMap::new();
        for r in &self.records {
            if let Some(value) = variable.value(r) {
                frames.entry(r.year_month()).or_default().push(DistrictValue {
                    district: r.district_key(),
                    lat: r.lat,
                    lon: r.lon,
                    value,
                });
            }
        }
        frames
    }

    /// Mean per (month, year), ordered by month then year
    pub fn month_year_means(&self, variable: ClimateVariable) -> Vec<MonthYearCell> {
        let mut cells: BTreeMap<(u32, i32), Vec<f64>> = BTreeMap::new();
        for r in &self.records {
            if let Some(value) = variable.value(r) {
                cells.entry((r.month, r.year)).or_default().push(value);
            }
        }
        cells
            .into_iter()
            .filter_map(|((month, year), values)| {
                Some(MonthYearCell {
                    month,
                    year,
                    value: mean_of(values)?,
                })
            })
            .collect()
    }

    /// Box-plot statistics per calendar month
    pub fn monthly_distribution(&self, variable: ClimateVariable) -> Vec<BoxStats> {
        let mut months: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for r in &self.records {
            if let Some(value) = variable.value(r) {
                months.entry(r.month).or_default().push(value);
            }
        }
        months
            .into_iter()
            .filter_map(|(month, mut values)| {
                values.sort_by(f64::total_cmp);
                Some(BoxStats {
                    month,
                    min: *values.first()?,
                    q1: quantile(&values, 0.25)?,
                    median: quantile(&values, 0.5)?,
                    q3: quantile(&values, 0.75)?,
                    max: *values.last()?,
                    count: values.len(),
                })
            })
            .collect()
    }

    /// Summary statistics of a variable over all rows
    pub fn summary(&self, variable: ClimateVariable) -> SummaryStatistics {
        let values: Vec<f64> = self.records.iter().filter_map(|r| variable.value(r)).collect();
        SummaryStatistics::compute(&values)
    }
}
