//! Prometheus implementation of the metrics port
//!
//! Each adapter owns its own recorder instead of installing a global one,
//! so several instances (one per test, say) never see each other's series.

use application::ports::{MetricLabel, MetricsPort, metric_names};
use metrics::{Label, with_local_recorder};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

/// Metrics sink rendering the Prometheus text exposition format
pub struct PrometheusMetricsAdapter {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl std::fmt::Debug for PrometheusMetricsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetricsAdapter").finish_non_exhaustive()
    }
}

impl PrometheusMetricsAdapter {
    /// Create an adapter with the request duration buckets configured
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(metric_names::HTTP_REQUEST_DURATION_SECONDS.to_string()),
                metric_names::DURATION_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        Ok(Self { recorder, handle })
    }

    fn labels(labels: &[MetricLabel]) -> Vec<Label> {
        labels
            .iter()
            .map(|(key, value)| Label::new(*key, value.clone()))
            .collect()
    }
}

impl MetricsPort for PrometheusMetricsAdapter {
    fn increment_counter(&self, name: &str, labels: &[MetricLabel]) {
        with_local_recorder(&self.recorder, || {
            metrics::counter!(name.to_owned(), Self::labels(labels)).increment(1);
        });
    }

    fn accumulate(&self, name: &str, labels: &[MetricLabel], amount: f64) {
        // Prometheus counters here are integral; float totals ride on a gauge
        // that is only ever increased.
        if amount <= 0.0 {
            return;
        }
        with_local_recorder(&self.recorder, || {
            metrics::gauge!(name.to_owned(), Self::labels(labels)).increment(amount);
        });
    }

    fn observe_histogram(&self, name: &str, labels: &[MetricLabel], value: f64) {
        with_local_recorder(&self.recorder, || {
            metrics::histogram!(name.to_owned(), Self::labels(labels)).record(value);
        });
    }

    fn set_gauge(&self, name: &str, labels: &[MetricLabel], value: f64) {
        with_local_recorder(&self.recorder, || {
            metrics::gauge!(name.to_owned(), Self::labels(labels)).set(value);
        });
    }

    fn adjust_gauge(&self, name: &str, labels: &[MetricLabel], delta: f64) {
        with_local_recorder(&self.recorder, || {
            metrics::gauge!(name.to_owned(), Self::labels(labels)).increment(delta);
        });
    }

    fn export_snapshot(&self) -> String {
        self.handle.render()
    }
}
