//! Configuration management for the scoring services

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stream: StreamConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Stream scorer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// NATS server address(es), comma separated
    pub servers: String,
    /// Subject for incoming transactions
    pub transaction_subject: String,
    /// Subject for outgoing scored transactions
    pub scored_subject: String,
    /// Queue group shared by competing scorer instances
    pub queue_group: String,
}

/// Synchronous scoring API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen port for the scoring API
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file plus environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    ///
    /// The file is optional; every setting has a default. Environment
    /// variables override file values with `__` as the section separator,
    /// e.g. `STREAM__SERVERS=nats://a:4222,nats://b:4222`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::default().separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stream: StreamConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            servers: "nats://localhost:4222".to_string(),
            transaction_subject: "transactions".to_string(),
            scored_subject: "scored-transactions".to_string(),
            queue_group: "fraud-scorers".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
