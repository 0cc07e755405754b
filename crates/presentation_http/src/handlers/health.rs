//! Service banner and health check handlers

use application::HealthReport;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Name reported by the root banner
pub const SERVICE_NAME: &str = "Orders API";

/// Root banner response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Identify the service
pub async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Report simulated dependency health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health.check())
}
