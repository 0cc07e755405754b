//! Order use cases
//!
//! Every operation follows the same protocol: apply the injected latency
//! for its route, roll for an injected failure, and only then fabricate a
//! response and update business metrics. Failures are returned to the
//! caller as-is; nothing here retries.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domain::{
    CREATED_STATUS, CreatedOrder, NewOrder, OrderDetail, OrderPage, OrderStatus, RouteKey,
    SearchResults, StatusChange,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{FaultController, OrderFabricator};
use crate::{
    error::ApplicationError,
    ports::{MetricsPort, metric_names as m},
};

const LIST_PROCESSING: RangeInclusive<Duration> =
    Duration::from_millis(10)..=Duration::from_millis(100);
const CREATE_PROCESSING: RangeInclusive<Duration> =
    Duration::from_millis(50)..=Duration::from_millis(500);
const SEARCH_PROCESSING: RangeInclusive<Duration> =
    Duration::from_millis(50)..=Duration::from_millis(150);

const LIST_FAILURE: &str = "Database connection failed";
const CREATE_FAILURE: &str = "Service temporarily unavailable";
const GET_FAILURE: &str = "Database error";
const NOT_FOUND: &str = "Order not found";
const UPDATE_FAILURE: &str = "Failed to update status";
const SEARCH_FAILURE: &str = "Search service unavailable";

/// Knobs for the synthetic work done after fault checks pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Sleep for a random processing time after fault checks
    #[serde(default = "default_processing_delay")]
    pub processing_delay: bool,

    /// Probability that a single-order lookup reports "not found",
    /// independent of injected errors
    #[serde(default = "default_not_found_rate")]
    pub not_found_rate: f64,

    /// Probability that an order listing counts as a cache hit
    #[serde(default = "default_cache_hit_rate")]
    pub cache_hit_rate: f64,

    /// Size of the simulated order collection
    #[serde(default = "default_total_orders")]
    pub total_orders: u64,
}

const fn default_processing_delay() -> bool {
    true
}

const fn default_not_found_rate() -> f64 {
    0.1
}

const fn default_cache_hit_rate() -> f64 {
    0.7
}

const fn default_total_orders() -> u64 {
    1000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            processing_delay: default_processing_delay(),
            not_found_rate: default_not_found_rate(),
            cache_hit_rate: default_cache_hit_rate(),
            total_orders: default_total_orders(),
        }
    }
}

/// Service implementing the order endpoints
pub struct OrderService {
    faults: Arc<FaultController>,
    metrics: Arc<dyn MetricsPort>,
    fabricator: OrderFabricator,
    config: SimulationConfig,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("faults", &self.faults)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OrderService {
    /// Create a new order service
    pub fn new(
        faults: Arc<FaultController>,
        metrics: Arc<dyn MetricsPort>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            faults,
            metrics,
            fabricator: OrderFabricator::new(),
            config,
        }
    }

    /// Simulation settings in effect
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Apply injected latency for `route`, then roll for an injected failure
    async fn inject_faults(
        &self,
        route: &RouteKey,
        on_failure: impl FnOnce() -> ApplicationError,
    ) -> Result<(), ApplicationError> {
        self.faults.apply_latency(route).await;
        if self.faults.should_fail() {
            let err = on_failure();
            debug!(route = %route, error = %err, "Injected failure");
            return Err(err);
        }
        Ok(())
    }

    /// Sleep for a simulated processing time; returns the time spent
    async fn simulate_processing(&self, range: &RangeInclusive<Duration>) -> Duration {
        if !self.config.processing_delay {
            return Duration::ZERO;
        }
        let delay = self.fabricator.processing_time(range);
        tokio::time::sleep(delay).await;
        delay
    }

    /// List a page of orders
    ///
    /// `force_failure` fails the request exactly like an injected error.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        limit: u32,
        offset: u32,
        force_failure: bool,
    ) -> Result<OrderPage, ApplicationError> {
        self.faults.apply_latency(&RouteKey::new(RouteKey::ORDERS)).await;
        if force_failure || self.faults.should_fail() {
            return Err(ApplicationError::Internal(LIST_FAILURE.to_string()));
        }

        if self.fabricator.roll(self.config.cache_hit_rate) {
            self.metrics.increment_counter(m::CACHE_HITS_TOTAL, &[]);
        }
        self.metrics.increment_counter(m::CACHE_REQUESTS_TOTAL, &[]);

        self.simulate_processing(&LIST_PROCESSING).await;

        Ok(OrderPage {
            orders: self.fabricator.order_page(limit, offset),
            total: self.config.total_orders,
            limit,
            offset,
        })
    }

    /// Accept a new order and echo it back with a generated id
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub async fn create_order(&self, order: NewOrder) -> Result<CreatedOrder, ApplicationError> {
        self.inject_faults(&RouteKey::new(RouteKey::ORDERS), || {
            ApplicationError::ServiceUnavailable(CREATE_FAILURE.to_string())
        })
        .await?;

        let processing_time = self.simulate_processing(&CREATE_PROCESSING).await;

        self.metrics.increment_counter(
            m::ORDERS_TOTAL,
            &[(m::LABEL_STATUS, CREATED_STATUS.to_string())],
        );
        self.metrics
            .accumulate(m::ORDER_REVENUE_TOTAL, &[], order.amount);
        self.metrics.increment_counter(
            m::ORDERS_PER_CUSTOMER_TOTAL,
            &[(m::LABEL_CUSTOMER_ID, order.customer_id.clone())],
        );

        Ok(CreatedOrder {
            id: self.fabricator.created_order_id(),
            status: CREATED_STATUS.to_string(),
            processing_time: processing_time.as_secs_f64(),
            order,
        })
    }

    /// Look up a single order
    ///
    /// Besides injected errors, a lookup reports "not found" with the
    /// configured probability.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<OrderDetail, ApplicationError> {
        self.inject_faults(&RouteKey::new(RouteKey::ORDER), || {
            ApplicationError::Internal(GET_FAILURE.to_string())
        })
        .await?;

        if self.fabricator.roll(self.config.not_found_rate) {
            return Err(ApplicationError::NotFound(NOT_FOUND.to_string()));
        }

        Ok(self.fabricator.order_detail(id))
    }

    /// Move an order to a new status
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        new_status: OrderStatus,
    ) -> Result<StatusChange, ApplicationError> {
        self.inject_faults(&RouteKey::new(RouteKey::ORDER_STATUS), || {
            ApplicationError::Internal(UPDATE_FAILURE.to_string())
        })
        .await?;

        let old_status = self.fabricator.previous_status();
        self.metrics.increment_counter(
            m::ORDERS_TOTAL,
            &[(
                m::LABEL_STATUS,
                OrderStatus::transition_label(old_status, new_status),
            )],
        );

        match new_status {
            OrderStatus::Completed => {
                self.metrics.increment_counter(m::ORDERS_COMPLETED_TOTAL, &[]);
            },
            OrderStatus::Cancelled => {
                self.metrics.increment_counter(m::ORDERS_CANCELLED_TOTAL, &[]);
            },
            OrderStatus::Pending | OrderStatus::Processing => {},
        }

        Ok(StatusChange {
            id: id.to_string(),
            old_status,
            new_status,
            updated_at: Utc::now(),
        })
    }

    /// Search orders
    ///
    /// Uses the search route's latency override when one is set.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchResults, ApplicationError> {
        self.inject_faults(&RouteKey::search(), || {
            ApplicationError::Internal(SEARCH_FAILURE.to_string())
        })
        .await?;

        self.simulate_processing(&SEARCH_PROCESSING).await;

        Ok(SearchResults::new(query, self.fabricator.search_hits()))
    }
}
