//! Configuration module.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: the HTTP listener and the model artifacts/training run.

mod model_config;
mod server_config;

pub use model_config::ModelEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub models: ModelEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env();
        let models = ModelEnvConfig::from_env().context("Failed to load model config")?;

        Ok(Self { server, models })
    }
}
