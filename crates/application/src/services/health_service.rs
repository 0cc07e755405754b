//! Health reporting service
//!
//! Reports the simulated state of the backing database and cache. Neither
//! exists; their health is rolled on every check so dashboards have
//! something to show.

use std::sync::Arc;
use std::time::Instant;

use domain::ComponentHealth;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{MetricsPort, metric_names as m};

/// Probability that the database reports degraded
const DATABASE_DEGRADED_RATE: f64 = 0.25;
/// Probability that the cache reports unhealthy
const CACHE_UNHEALTHY_RATE: f64 = 0.05;
/// Range of the simulated active database connection count
const DB_CONNECTIONS: std::ops::RangeInclusive<u32> = 5..=50;

/// Result of a health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// `healthy` when every component is healthy, `degraded` otherwise
    pub status: ComponentHealth,
    pub database: ComponentHealth,
    pub cache: ComponentHealth,
    /// Seconds since the service started
    pub uptime: f64,
}

/// Service producing health reports
pub struct HealthService {
    metrics: Arc<dyn MetricsPort>,
    started_at: Instant,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    /// Create a health service; uptime counts from now
    pub fn new(metrics: Arc<dyn MetricsPort>) -> Self {
        Self {
            metrics,
            started_at: Instant::now(),
        }
    }

    /// Roll component health and publish the simulated connection count
    pub fn check(&self) -> HealthReport {
        let mut rng = rand::rng();

        let database = if rng.random_bool(DATABASE_DEGRADED_RATE) {
            ComponentHealth::Degraded
        } else {
            ComponentHealth::Healthy
        };
        let cache = if rng.random_bool(CACHE_UNHEALTHY_RATE) {
            ComponentHealth::Unhealthy
        } else {
            ComponentHealth::Healthy
        };

        let connections = rng.random_range(DB_CONNECTIONS);
        self.metrics.set_gauge(
            m::DATABASE_CONNECTIONS_ACTIVE,
            &[],
            f64::from(connections),
        );

        let report = Self::combine(database, cache, self.started_at.elapsed().as_secs_f64());
        debug!(status = %report.status, "Health check");
        report
    }

    fn combine(database: ComponentHealth, cache: ComponentHealth, uptime: f64) -> HealthReport {
        let status = if database.is_healthy() && cache.is_healthy() {
            ComponentHealth::Healthy
        } else {
            ComponentHealth::Degraded
        };
        HealthReport {
            status,
            database,
            cache,
            uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockMetricsPort;

    #[test]
    fn combined_status_is_healthy_only_when_all_are() {
        let report =
            HealthService::combine(ComponentHealth::Healthy, ComponentHealth::Healthy, 1.0);
        assert_eq!(report.status, ComponentHealth::Healthy);

        let report =
            HealthService::combine(ComponentHealth::Degraded, ComponentHealth::Healthy, 1.0);
        assert_eq!(report.status, ComponentHealth::Degraded);

        let report =
            HealthService::combine(ComponentHealth::Healthy, ComponentHealth::Unhealthy, 1.0);
        assert_eq!(report.status, ComponentHealth::Degraded);
    }

    #[test]
    fn check_publishes_connection_gauge() {
        let mut metrics = MockMetricsPort::new();
        metrics
            .expect_set_gauge()
            .withf(|name, _, value| {
                name == m::DATABASE_CONNECTIONS_ACTIVE && (5.0..=50.0).contains(value)
            })
            .times(1)
            .return_const(());
        let service = HealthService::new(Arc::new(metrics));

        let report = service.check();

        assert!(report.uptime >= 0.0);
        assert_ne!(report.database, ComponentHealth::Unhealthy);
        assert_ne!(report.cache, ComponentHealth::Degraded);
    }
}
