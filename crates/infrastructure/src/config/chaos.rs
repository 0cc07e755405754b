//! Initial fault state applied at startup.

use std::time::Duration;

use application::FaultController;
use domain::RouteKey;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound for any configured latency, in milliseconds
pub const MAX_LATENCY_MS: u64 = 5000;

/// Chaos settings the service starts with
///
/// Uses the same ranges the chaos admin endpoints enforce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChaosDefaults {
    /// Latency added to every business route
    #[serde(default)]
    #[validate(range(max = MAX_LATENCY_MS))]
    pub latency_ms: u64,

    /// Latency for the search route, overriding `latency_ms` when non-zero
    #[serde(default)]
    #[validate(range(max = MAX_LATENCY_MS))]
    pub search_latency_ms: u64,

    /// Probability that a business request fails
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub error_rate: f64,
}

impl ChaosDefaults {
    /// Push these settings into a fault controller
    pub fn apply(&self, faults: &FaultController) {
        if self.latency_ms > 0 {
            faults.set_default_latency(Duration::from_millis(self.latency_ms));
        }
        if self.search_latency_ms > 0 {
            faults.set_route_latency(
                RouteKey::search(),
                Duration::from_millis(self.search_latency_ms),
            );
        }
        faults.set_error_probability(self.error_rate);
    }
}
