//! Request instrumentation middleware
//!
//! Times every request, labels it with its route key and records the
//! outcome. The metrics export route itself is passed through untouched.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use application::ports::{MetricsPort, metric_names as m};
use axum::{body::Body, extract::Request, response::Response};
use domain::RouteKey;
use tower::{Layer, Service};
use tracing::Instrument;

/// Path of the metrics export route, never instrumented
pub const METRICS_PATH: &str = "/metrics";

/// Holds one slot of the active requests gauge
///
/// The slot is released on drop, which covers normal completion, error
/// responses, panics and a client abandoning the request mid-flight.
pub struct ActiveRequestGuard {
    metrics: Arc<dyn MetricsPort>,
}

impl ActiveRequestGuard {
    /// Increment the active requests gauge
    pub fn acquire(metrics: Arc<dyn MetricsPort>) -> Self {
        metrics.adjust_gauge(m::HTTP_REQUESTS_ACTIVE, &[], 1.0);
        Self { metrics }
    }
}

impl Drop for ActiveRequestGuard {
    fn drop(&mut self) {
        self.metrics.adjust_gauge(m::HTTP_REQUESTS_ACTIVE, &[], -1.0);
    }
}

impl std::fmt::Debug for ActiveRequestGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveRequestGuard").finish_non_exhaustive()
    }
}

/// Layer that records request metrics
#[derive(Clone)]
pub struct RequestMetricsLayer {
    metrics: Arc<dyn MetricsPort>,
}

impl RequestMetricsLayer {
    /// Create a new layer writing to `metrics`
    pub fn new(metrics: Arc<dyn MetricsPort>) -> Self {
        Self { metrics }
    }
}

impl std::fmt::Debug for RequestMetricsLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestMetricsLayer").finish_non_exhaustive()
    }
}

impl<S> Layer<S> for RequestMetricsLayer {
    type Service = RequestMetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestMetricsService {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Service that measures each request
#[derive(Clone)]
pub struct RequestMetricsService<S> {
    inner: S,
    metrics: Arc<dyn MetricsPort>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for RequestMetricsService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestMetricsService")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Body>> for RequestMetricsService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        // The clone may not be ready; keep the driven service for this call
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if request.uri().path() == METRICS_PATH {
            return Box::pin(inner.call(request));
        }

        let route = RouteKey::from_path(request.uri().path());
        let method = request.method().to_string();
        let span = tracing::info_span!(
            "http_request",
            method = %method,
            route = %route,
            status = tracing::field::Empty,
        );

        let metrics = Arc::clone(&self.metrics);
        let guard = ActiveRequestGuard::acquire(Arc::clone(&metrics));

        Box::pin(
            async move {
                let _guard = guard;
                let start = Instant::now();

                let result = inner.call(request).await;

                let elapsed = start.elapsed().as_secs_f64();
                // Errors never reach here from axum; count them as 500 all the same
                let status = result
                    .as_ref()
                    .map_or(500, |response| response.status().as_u16());
                tracing::Span::current().record("status", status);

                metrics.observe_histogram(
                    m::HTTP_REQUEST_DURATION_SECONDS,
                    &[
                        (m::LABEL_METHOD, method.clone()),
                        (m::LABEL_ENDPOINT, route.to_string()),
                    ],
                    elapsed,
                );
                metrics.increment_counter(
                    m::HTTP_REQUESTS_TOTAL,
                    &[
                        (m::LABEL_METHOD, method),
                        (m::LABEL_ENDPOINT, route.into_inner()),
                        (m::LABEL_STATUS, status.to_string()),
                    ],
                );
                tracing::debug!(status, elapsed_secs = elapsed, "Request finished");

                result
            }
            .instrument(span),
        )
    }
}
