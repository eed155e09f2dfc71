//! Configuration management.

use anyhow::{Context, Result};
use sensorlog_core::{SensorKind, SensorRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Log filter used when neither RUST_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Line that ends manual or serial record entry
    #[serde(default = "default_exit_word")]
    pub exit_word: String,

    /// Serial device configuration
    #[serde(default)]
    pub serial: SerialConfig,

    /// Sensors registered at startup
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

/// Serial device configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Serial port path
    #[serde(default = "default_serial_device")]
    pub device: String,

    /// Line speed (9600, 19200, 38400, 57600 or 115200)
    #[serde(default = "default_baud")]
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: default_serial_device(),
            baud: default_baud(),
        }
    }
}

/// A sensor to register at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensorConfig {
    /// Sensor variant
    pub kind: SensorKindConfig,

    /// Sensor identifier as it appears in records
    pub name: String,
}

/// Sensor variant as spelled in the configuration file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SensorKindConfig {
    Pressure,
    Temperature,
}

impl From<SensorKindConfig> for SensorKind {
    fn from(kind: SensorKindConfig) -> Self {
        match kind {
            SensorKindConfig::Pressure => SensorKind::Pressure,
            SensorKindConfig::Temperature => SensorKind::Temperature,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_exit_word() -> String {
    "quit".to_string()
}

fn default_serial_device() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud() -> u32 {
    9600
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Builds a registry holding the configured sensors, in file order.
    pub fn registry(&self) -> SensorRegistry {
        let mut registry = SensorRegistry::new();
        for sensor in &self.sensors {
            let kind = SensorKind::from(sensor.kind);
            registry.push(kind.build(sensor.name.as_str()));
        }
        registry
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            exit_word: default_exit_word(),
            serial: SerialConfig::default(),
            sensors: Vec::new(),
        }
    }
}
