//! Range Checking for Prediction Inputs

use crate::error::ValidationError;
use crate::inputs::ClimateInputs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Precipitation valid range (mm)
    pub precipitation_range: (f64, f64),
    /// Average and maximum temperature valid range (°C)
    pub temperature_range: (f64, f64),
    /// Relative humidity valid range (%)
    pub humidity_range: (f64, f64),
    /// Wind speed valid range (m/s)
    pub wind_speed_range: (f64, f64),
    /// Soil moisture valid range (%)
    pub soil_moisture_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            precipitation_range: (0.0, 2000.0),
            temperature_range: (-10.0, 60.0),
            humidity_range: (0.0, 100.0),
            wind_speed_range: (0.0, 100.0),
            soil_moisture_range: (0.0, 100.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for prediction form input
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate month
    pub fn validate_month(&self, month: u32) -> Result<(), ValidationError> {
        if (1..=12).contains(&month) {
            Ok(())
        } else {
            Err(ValidationError::InvalidMonth(month))
        }
    }

    /// Validate precipitation
    pub fn validate_precipitation(&self, mm: f64) -> Result<(), ValidationError> {
        self.validate_range("precipitation", mm, self.config.precipitation_range)
    }

    /// Validate average temperature
    pub fn validate_avg_temp(&self, temp: f64) -> Result<(), ValidationError> {
        self.validate_range("avg_temp", temp, self.config.temperature_range)
    }

    /// Validate maximum temperature
    pub fn validate_max_temp(&self, temp: f64) -> Result<(), ValidationError> {
        self.validate_range("max_temp", temp, self.config.temperature_range)
    }

    /// Validate humidity
    pub fn validate_humidity(&self, pct: f64) -> Result<(), ValidationError> {
        self.validate_range("humidity", pct, self.config.humidity_range)
    }

    /// Validate wind speed
    pub fn validate_wind_speed(&self, speed: f64) -> Result<(), ValidationError> {
        self.validate_range("wind_speed", speed, self.config.wind_speed_range)
    }

    /// Validate soil moisture
    pub fn validate_soil_moisture(&self, pct: f64) -> Result<(), ValidationError> {
        self.validate_range("soil_moisture", pct, self.config.soil_moisture_range)
    }

    /// Validate all fields, stopping at the first failure
    pub fn validate(&self, inputs: &ClimateInputs) -> Result<(), ValidationError> {
        self.validate_month(inputs.month)?;
        self.validate_precipitation(inputs.precipitation_mm)?;
        self.validate_avg_temp(inputs.avg_temp_c)?;
        self.validate_max_temp(inputs.max_temp_c)?;
        self.validate_humidity(inputs.humidity_pct)?;
        self.validate_wind_speed(inputs.wind_speed_ms)?;
        if let Some(soil) = inputs.soil_moisture_pct {
            self.validate_soil_moisture(soil)?;
        }
        Ok(())
    }

    /// Validate all fields, collecting every failure
    pub fn validate_all(&self, inputs: &ClimateInputs) -> ValidationResult {
        let mut checks = vec![
            self.validate_month(inputs.month),
            self.validate_precipitation(inputs.precipitation_mm),
            self.validate_avg_temp(inputs.avg_temp_c),
            self.validate_max_temp(inputs.max_temp_c),
            self.validate_humidity(inputs.humidity_pct),
            self.validate_wind_speed(inputs.wind_speed_ms),
        ];
        if let Some(soil) = inputs.soil_moisture_pct {
            checks.push(self.validate_soil_moisture(soil));
        }

        let fields_checked = checks.len();
        let errors: Vec<_> = checks.into_iter().filter_map(Result::err).collect();

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Input validation failed with {} errors", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
