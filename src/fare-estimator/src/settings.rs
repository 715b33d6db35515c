use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

static DEFAULT_QUEUE_SIZE: usize = 256;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,
    pub num_workers: u32,
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    pub fare: FareSettings,
}

/// Rates and thresholds of the fare model, speeds are in km/h.
#[derive(Debug, Clone, Deserialize)]
pub struct FareSettings {
    pub standard_fee: f64,
    pub minimum: f64,
    pub max_speed_kmh: f64,
    pub idle_speed_kmh: f64,
    pub idle_price_per_hour: f64,
    pub day_rate_per_km: f64,
    pub night_rate_per_km: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Settings {
    /// Reads the settings from the YAML file at `path`, values can be overridden with
    /// `FARE_ESTIMATOR__`-prefixed environment variables.
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(Environment::with_prefix("FARE_ESTIMATOR").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.num_workers == 0 {
            return Err(ConfigError::Message(
                "num_workers must be at least 1".into(),
            ));
        }
        if self.queue_size == 0 {
            return Err(ConfigError::Message("queue_size must be at least 1".into()));
        }
        Ok(())
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn default_queue_size() -> usize {
    DEFAULT_QUEUE_SIZE
}

fn default_timezone() -> Tz {
    Tz::UTC
}
