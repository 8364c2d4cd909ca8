//! Configuration loading for MargaPlan

use crate::error::{MargaError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
}

/// Sensor cloud acquisition settings
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Maximum age of a cached cloud before a new one is requested (default: 100)
    #[serde(default = "default_freshness_ms")]
    pub freshness_ms: u64,

    /// Upper bound on waiting for a fresh cloud (default: 2000)
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

impl SensorConfig {
    pub fn freshness(&self) -> Duration {
        Duration::from_millis(self.freshness_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

// Default value functions
fn default_freshness_ms() -> u64 {
    100
}
fn default_wait_timeout_ms() -> u64 {
    2000
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            freshness_ms: default_freshness_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl Default for MargaConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
        }
    }
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
