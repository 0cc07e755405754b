//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `chaos`: fault state applied at startup
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then `ORDERS_API__*` environment variables.

mod chaos;
mod server;

use std::fmt;
use std::path::Path;

use application::SimulationConfig;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::telemetry::TelemetryConfig;

pub use chaos::{ChaosDefaults, MAX_LATENCY_MS};
pub use server::{LogFormat, ServerConfig};

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "ORDERS_API";

/// Application environment (development or production)
///
/// Only reported in the build info metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Synthetic workload knobs
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Initial chaos state
    #[serde(default)]
    pub chaos: ChaosDefaults,

    /// Log output configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config` file
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            config::File::with_name("config").required(false),
            env_source(),
        )
    }

    /// Load configuration from an explicit file, still honoring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true), env_source())
    }

    fn build(
        file: impl config::Source + Send + Sync + 'static,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let config: Self = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config
            .chaos
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid chaos defaults: {e}")))?;

        debug!(
            host = %config.server.host,
            port = config.server.port,
            environment = %config.environment,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Environment source, e.g. `ORDERS_API__SERVER__PORT=9090`
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
