//! Metrics port
//!
//! The sink every request and business observation is written to. The
//! aggregation and exposition format belong to the adapter; this port only
//! promises that every call made through it is reflected in the next
//! [`MetricsPort::export_snapshot`], and that concurrent calls are never lost.

#[cfg(test)]
use mockall::automock;

/// A single `(label name, label value)` pair
pub type MetricLabel = (&'static str, String);

/// Metric and label names emitted by the service
pub mod metric_names {
    /// Counter of finished requests by method, endpoint and status
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    /// Histogram of request durations in seconds by method and endpoint
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
    /// Gauge of requests currently in flight
    pub const HTTP_REQUESTS_ACTIVE: &str = "http_requests_active";

    /// Counter of orders by status or status transition
    pub const ORDERS_TOTAL: &str = "orders_total";
    /// Accumulated revenue of created orders
    pub const ORDER_REVENUE_TOTAL: &str = "order_revenue_total";
    /// Counter of created orders per customer
    pub const ORDERS_PER_CUSTOMER_TOTAL: &str = "orders_per_customer_total";
    pub const ORDERS_COMPLETED_TOTAL: &str = "orders_completed_total";
    pub const ORDERS_CANCELLED_TOTAL: &str = "orders_cancelled_total";

    /// Gauge mirroring the configured chaos error probability
    pub const CHAOS_ERROR_RATE: &str = "chaos_error_rate";
    /// Gauge of bytes deliberately retained by the memory leak experiment
    pub const CHAOS_LEAKED_BYTES: &str = "chaos_leaked_bytes";

    pub const DATABASE_CONNECTIONS_ACTIVE: &str = "database_connections_active";
    pub const CACHE_HITS_TOTAL: &str = "cache_hits_total";
    pub const CACHE_REQUESTS_TOTAL: &str = "cache_requests_total";

    /// Constant 1 gauge carrying build metadata as labels
    pub const SERVICE_BUILD_INFO: &str = "service_build_info";

    pub const LABEL_METHOD: &str = "method";
    pub const LABEL_ENDPOINT: &str = "endpoint";
    pub const LABEL_STATUS: &str = "status";
    pub const LABEL_CUSTOMER_ID: &str = "customer_id";
    pub const LABEL_VERSION: &str = "version";
    pub const LABEL_ENVIRONMENT: &str = "environment";

    /// Bucket boundaries for request durations, in seconds
    pub const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
}

/// Port for recording metrics
///
/// Series are created lazily on first use of a given name and label set
/// and live for the lifetime of the sink.
#[cfg_attr(test, automock)]
pub trait MetricsPort: Send + Sync {
    /// Increment a counter by one
    fn increment_counter(&self, name: &str, labels: &[MetricLabel]);

    /// Add a non-negative amount to a monotonically growing series
    fn accumulate(&self, name: &str, labels: &[MetricLabel], amount: f64);

    /// Record one histogram observation
    fn observe_histogram(&self, name: &str, labels: &[MetricLabel], value: f64);

    /// Set a gauge to an absolute value
    fn set_gauge(&self, name: &str, labels: &[MetricLabel], value: f64);

    /// Add `delta` to a gauge (negative values decrease it)
    fn adjust_gauge(&self, name: &str, labels: &[MetricLabel], delta: f64);

    /// Render all series in the sink's exposition format
    fn export_snapshot(&self) -> String;
}
