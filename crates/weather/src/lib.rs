//! Current Weather
//!
//! Supplies "current conditions" for a district so the prediction form can
//! be prefilled. Only a fixed-value source exists; a live provider would
//! implement [`WeatherSource`].

use input_validator::{ClimateInputs, Location};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Current conditions at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub precipitation_mm: f64,
    pub avg_temp_c: f64,
    pub max_temp_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
}

impl CurrentWeather {
    /// Override the weather fields of form input, keeping month and soil moisture
    pub fn apply(&self, inputs: ClimateInputs) -> ClimateInputs {
        ClimateInputs {
            precipitation_mm: self.precipitation_mm,
            avg_temp_c: self.avg_temp_c,
            max_temp_c: self.max_temp_c,
            humidity_pct: self.humidity_pct,
            wind_speed_ms: self.wind_speed_ms,
            ..inputs
        }
    }
}

/// Source of current weather
pub trait WeatherSource {
    fn current(&self, location: &Location) -> impl Future<Output = CurrentWeather> + Send;
}

/// Fixed readings returned after a simulated network delay
#[derive(Debug, Clone)]
pub struct StubWeatherSource {
    latency: Duration,
}

impl Default for StubWeatherSource {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(1),
        }
    }
}

impl StubWeatherSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl WeatherSource for StubWeatherSource {
    async fn current(&self, location: &Location) -> CurrentWeather {
        debug!("Fetching weather for {}", location.district);
        tokio::time::sleep(self.latency).await;

        CurrentWeather {
            precipitation_mm: 10.2,
            avg_temp_c: 28.5,
            max_temp_c: 35.3,
            humidity_pct: 45.0,
            wind_speed_ms: 3.2,
        }
    }
}
