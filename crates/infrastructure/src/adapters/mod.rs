//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod prometheus_metrics_adapter;

pub use prometheus_metrics_adapter::PrometheusMetricsAdapter;
