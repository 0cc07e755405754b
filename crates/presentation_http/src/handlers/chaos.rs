//! Chaos control handlers
//!
//! Parameters arrive in the query string and are range-checked here, before
//! anything reaches the fault controller.

use std::time::Duration;

use application::{FaultStatus, ports::metric_names as m};
use axum::{Json, extract::State};
use domain::RouteKey;
use infrastructure::config::MAX_LATENCY_MS;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{error::ApiError, middleware::ValidatedQuery, state::AppState};

/// Confirmation returned by every chaos mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosResponse {
    pub message: String,
}

impl ChaosResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Current chaos state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosStatusResponse {
    #[serde(flatten)]
    pub faults: FaultStatus,
    /// Latency override of the search route, 0 when none is set
    pub search_latency_ms: u64,
}

/// `ms` parameter shared by the latency endpoints
#[derive(Debug, Deserialize, Validate)]
pub struct LatencyParams {
    #[validate(range(max = MAX_LATENCY_MS, message = "must be between 0 and 5000"))]
    pub ms: u64,
}

fn fault_injected_route(route: &str) -> Result<(), ValidationError> {
    if !route.starts_with('/') {
        return Err(ValidationError::new("route").with_message("must start with '/'".into()));
    }
    if !RouteKey::from_path(route).is_fault_injected() {
        return Err(ValidationError::new("route")
            .with_message("no handler on this route applies injected latency".into()));
    }
    Ok(())
}

fn finite(rate: f64) -> Result<(), ValidationError> {
    if rate.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("rate").with_message("must be a number".into()))
    }
}

/// Parameters of `POST /chaos/route-latency`
#[derive(Debug, Deserialize, Validate)]
pub struct RouteLatencyParams {
    #[validate(custom(function = fault_injected_route))]
    pub route: String,
    #[validate(range(max = MAX_LATENCY_MS, message = "must be between 0 and 5000"))]
    pub ms: u64,
}

/// Parameters of `POST /chaos/errors`
#[derive(Debug, Deserialize, Validate)]
pub struct ErrorRateParams {
    #[validate(
        custom(function = finite),
        range(min = 0.0, max = 1.0, message = "must be between 0 and 1")
    )]
    pub rate: f64,
}

const fn default_leak_size() -> u32 {
    10
}

/// Parameters of `DELETE /chaos/memory-leak`
#[derive(Debug, Deserialize, Validate)]
pub struct MemoryLeakParams {
    #[serde(default = "default_leak_size")]
    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    pub size_mb: u32,
}

#[allow(clippy::cast_precision_loss)]
fn publish_leaked_bytes(state: &AppState, leaked_bytes: u64) {
    state
        .metrics
        .set_gauge(m::CHAOS_LEAKED_BYTES, &[], leaked_bytes as f64);
}

/// Add latency to every business route
pub async fn set_latency(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<LatencyParams>,
) -> Json<ChaosResponse> {
    state
        .faults
        .set_default_latency(Duration::from_millis(params.ms));
    ChaosResponse::new(format!("Latency set to {}ms", params.ms))
}

/// Add latency to the search route only
pub async fn set_search_latency(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<LatencyParams>,
) -> Json<ChaosResponse> {
    state
        .faults
        .set_route_latency(RouteKey::search(), Duration::from_millis(params.ms));
    ChaosResponse::new(format!("Search latency set to {}ms", params.ms))
}

/// Add latency to one business route
pub async fn set_route_latency(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<RouteLatencyParams>,
) -> Json<ChaosResponse> {
    let route = RouteKey::from_path(&params.route);
    let message = format!("Latency for {route} set to {}ms", params.ms);
    state
        .faults
        .set_route_latency(route, Duration::from_millis(params.ms));
    ChaosResponse::new(message)
}

/// Set the probability of induced failures
pub async fn set_error_rate(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ErrorRateParams>,
) -> Json<ChaosResponse> {
    state.faults.set_error_probability(params.rate);
    state
        .metrics
        .set_gauge(m::CHAOS_ERROR_RATE, &[], state.faults.error_probability());
    ChaosResponse::new(format!("Error rate set to {}%", params.rate * 100.0))
}

/// Clear all chaos settings and release leaked memory
pub async fn reset(State(state): State<AppState>) -> Json<ChaosResponse> {
    state.faults.reset();
    state.metrics.set_gauge(m::CHAOS_ERROR_RATE, &[], 0.0);
    publish_leaked_bytes(&state, 0);
    ChaosResponse::new("Chaos settings reset")
}

/// Retain a block of memory until the next reset
pub async fn memory_leak(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<MemoryLeakParams>,
) -> Result<Json<ChaosResponse>, ApiError> {
    let blocks = state.faults.leak_memory(params.size_mb).await?;
    publish_leaked_bytes(&state, state.faults.status().leaked_bytes);
    Ok(ChaosResponse::new(format!(
        "Memory leak started: {}MB retained, {blocks} blocks held",
        params.size_mb
    )))
}

/// Snapshot of the chaos state
pub async fn status(State(state): State<AppState>) -> Json<ChaosStatusResponse> {
    let faults = state.faults.status();
    let search_latency_ms = faults.route_latency(RouteKey::SEARCH).unwrap_or(0);
    Json(ChaosStatusResponse {
        faults,
        search_latency_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_bounds() {
        assert!(LatencyParams { ms: 0 }.validate().is_ok());
        assert!(LatencyParams { ms: MAX_LATENCY_MS }.validate().is_ok());
        assert!(LatencyParams { ms: MAX_LATENCY_MS + 1 }.validate().is_err());
    }

    #[test]
    fn error_rate_bounds() {
        assert!(ErrorRateParams { rate: 1.0 }.validate().is_ok());
        assert!(ErrorRateParams { rate: -0.1 }.validate().is_err());
        assert!(ErrorRateParams { rate: 1.1 }.validate().is_err());
        assert!(ErrorRateParams { rate: f64::NAN }.validate().is_err());
        assert!(ErrorRateParams { rate: f64::INFINITY }.validate().is_err());
    }

    #[test]
    fn leak_size_defaults_and_bounds() {
        let params: MemoryLeakParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.size_mb, 10);
        assert!(MemoryLeakParams { size_mb: 0 }.validate().is_err());
        assert!(MemoryLeakParams { size_mb: 1001 }.validate().is_err());
    }

    #[test]
    fn route_must_be_an_absolute_business_route() {
        let relative = RouteLatencyParams {
            route: "orders".to_string(),
            ms: 10,
        };
        let errors = relative.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("route"));

        let absolute = RouteLatencyParams {
            route: "/orders".to_string(),
            ms: 10,
        };
        assert!(absolute.validate().is_ok());

        for route in ["/health", "/", "/metrics"] {
            let ignored = RouteLatencyParams {
                route: route.to_string(),
                ms: 10,
            };
            assert!(ignored.validate().is_err(), "{route} accepted");
        }
    }

    #[test]
    fn status_response_flattens_faults() {
        let response = ChaosStatusResponse {
            faults: FaultStatus::default(),
            search_latency_ms: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        for field in [
            "latency_ms",
            "search_latency_ms",
            "route_latency_ms",
            "error_rate",
            "leaked_blocks",
            "leaked_bytes",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
