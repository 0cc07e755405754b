//! HTTP middleware

pub mod request_metrics;
pub mod validation;

pub use request_metrics::{
    ActiveRequestGuard, METRICS_PATH, RequestMetricsLayer, RequestMetricsService,
};
pub use validation::{ValidatedJson, ValidatedQuery, ValidationError};
