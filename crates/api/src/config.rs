//! Server Settings
//!
//! Layered: built-in defaults, then an optional TOML file
//! (`config/default.toml`, or the path in `FIRE_RISK_CONFIG`), then
//! `FIRE_RISK__SECTION__KEY` environment variables.

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an alternative settings file
pub const CONFIG_PATH_VAR: &str = "FIRE_RISK_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub models: ModelSettings,
    pub weather: WeatherSettings,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Listen address
    pub addr: String,
    /// Max tracing level (trace, debug, info, warn, error)
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Root of the raw/ and processed/ dataset tree
    pub dir: PathBuf,
    pub climate_csv: PathBuf,
    pub combined_csv: PathBuf,
    pub feedback_csv: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub dir: PathBuf,
    /// Use the rule-based stand-in models instead of loading artifacts
    pub mock: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    pub latency_ms: u64,
}

impl WeatherSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Settings {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load with an explicit settings file, which may be absent
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FIRE_RISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let limits = RateLimitConfig::default();
        Config::builder()
            .set_default("server.addr", "0.0.0.0:8080")?
            .set_default("server.log_level", "info")?
            .set_default("data.dir", "data")?
            .set_default("data.climate_csv", "data/processed/flitered_climate_data.csv")?
            .set_default("data.combined_csv", "data/processed/combined_fire_climate.csv")?
            .set_default("data.feedback_csv", "feedback_data.csv")?
            .set_default("models.dir", "models")?
            .set_default("models.mock", false)?
            .set_default("weather.latency_ms", 1000_i64)?
            .set_default("rate_limit.per_second", limits.per_second as i64)?
            .set_default("rate_limit.burst_size", limits.burst_size as i64)
    }
}
