//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the Prometheus
//! metrics sink, configuration loading and log output.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ChaosDefaults, Environment, LogFormat, ServerConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_tracing};
