//! Error types for MargaPlan

use thiserror::Error;

/// MargaPlan error type
#[derive(Error, Debug)]
pub enum MargaError {
    /// Malformed roadmap spec, invalid volume geometry, or a start/goal
    /// configuration that matches no roadmap vertex length.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Roadmap file unreadable or rejected by the search engine.
    #[error("Roadmap load failed: {0}")]
    Load(String),

    /// Collision-check or roadmap-write call failed against attached hardware.
    #[error("Device error: {0}")]
    Device(String),

    /// The search engine returned a non-success status.
    #[error("Search failed ({code}): {message}")]
    Search { code: i32, message: String },

    /// No fresh sensor cloud arrived within the configured wait window.
    #[error("Timed out waiting for a fresh sensor cloud")]
    SensorTimeout,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
