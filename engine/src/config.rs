//! Configuration for the sample evaluation engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CQA_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Prediction service connection
    pub prediction: PredictionConfig,

    /// Live (what-if) simulation tuning
    pub live: LiveConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PredictionConfig {
    /// Base URL of the prediction service
    pub base_url: String,

    /// Optional per-request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LiveConfig {
    /// Quiet period after the last edit before a live prediction is issued
    pub settle_ms: u64,
}

impl LiveConfig {
    pub fn settle_period(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_SETTLE_MS: u64 = 500;

impl EngineConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CQA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("prediction.base_url", DEFAULT_BASE_URL)?
            .set_default("live.settle_ms", DEFAULT_SETTLE_MS)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CQA_ prefix)
            .add_source(
                Environment::with_prefix("CQA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prediction: PredictionConfig::default(),
            live: LiveConfig::default(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = EngineConfig::default();
        assert_eq!(config.prediction.base_url, "http://localhost:5000");
        assert_eq!(config.prediction.request_timeout_secs, None);
        assert_eq!(config.live.settle_period(), Duration::from_millis(500));
    }
}
