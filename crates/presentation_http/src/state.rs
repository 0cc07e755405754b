//! Application state shared across handlers

use std::sync::Arc;

use application::{FaultController, HealthService, MetricsPort, OrderService};
use infrastructure::AppConfig;

/// Shared application state
///
/// Every piece is owned here and injected, so tests can build as many
/// independent instances as they like.
#[derive(Clone)]
pub struct AppState {
    /// Order use cases
    pub orders: Arc<OrderService>,
    /// Simulated dependency health
    pub health: Arc<HealthService>,
    /// Chaos state consulted by every business route
    pub faults: Arc<FaultController>,
    /// Metrics sink, also rendered by `/metrics`
    pub metrics: Arc<dyn MetricsPort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("faults", &self.faults)
            .field("simulation", self.orders.config())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services together and apply the configured chaos defaults
    pub fn new(config: AppConfig, metrics: Arc<dyn MetricsPort>) -> Self {
        let faults = Arc::new(FaultController::new());
        config.chaos.apply(&faults);

        let orders = OrderService::new(
            Arc::clone(&faults),
            Arc::clone(&metrics),
            config.simulation.clone(),
        );
        let health = HealthService::new(Arc::clone(&metrics));

        Self {
            orders: Arc::new(orders),
            health: Arc::new(health),
            faults,
            metrics,
        }
    }
}
