//! Route definitions

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{
    handlers,
    middleware::{METRICS_PATH, RequestMetricsLayer},
    state::AppState,
};

/// Create the main router with all routes
///
/// Every route except `/metrics` is measured by [`RequestMetricsLayer`].
/// Panics inside handlers become 500 responses and are counted as such.
pub fn create_router(state: AppState) -> Router {
    let metrics = Arc::clone(&state.metrics);

    Router::new()
        // Service info
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Orders
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/orders/{order_id}", get(handlers::orders::get_order))
        .route(
            "/orders/{order_id}/status",
            put(handlers::orders::update_order_status),
        )
        .route("/search", get(handlers::search::search_orders))
        // Chaos control
        .route("/chaos/latency", post(handlers::chaos::set_latency))
        .route(
            "/chaos/latency-search",
            post(handlers::chaos::set_search_latency),
        )
        .route(
            "/chaos/route-latency",
            post(handlers::chaos::set_route_latency),
        )
        .route("/chaos/errors", post(handlers::chaos::set_error_rate))
        .route("/chaos/reset", post(handlers::chaos::reset))
        .route("/chaos/memory-leak", delete(handlers::chaos::memory_leak))
        .route("/chaos/status", get(handlers::chaos::status))
        // Metrics export
        .route(METRICS_PATH, get(handlers::metrics::export_metrics))
        .layer(CatchPanicLayer::new())
        .layer(RequestMetricsLayer::new(metrics))
        .with_state(state)
}
