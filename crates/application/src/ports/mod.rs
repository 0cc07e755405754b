//! Port definitions (interfaces for adapters)

pub mod metrics_port;

pub use metrics_port::{MetricLabel, MetricsPort, metric_names};

#[cfg(test)]
pub use metrics_port::MockMetricsPort;
