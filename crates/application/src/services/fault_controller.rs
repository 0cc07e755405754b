//! Fault controller for chaos experiments.
//!
//! Holds the process-wide fault configuration that every order endpoint
//! consults before doing its work: an extra delay (global, or overridden per
//! route), an error probability, and a list of deliberately retained memory
//! blocks.
//!
//! The controller is an owned value handed to whoever needs it, so tests can
//! run independent instances side by side. All mutation is synchronous and
//! happens under a short-lived lock; the only suspension point is the sleep
//! in [`FaultController::apply_latency`], which runs after the lock is
//! released.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use domain::RouteKey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ApplicationError;

/// Bytes per megabyte for the memory leak experiment
const BYTES_PER_MB: usize = 1024 * 1024;

/// Fill byte for leaked blocks. Non-zero so the pages are actually touched
/// and show up in the resident set size.
const LEAK_FILL: u8 = 0xA5;

/// Mutable fault configuration
#[derive(Debug, Default)]
pub struct FaultConfig {
    /// Delay applied to every route without an override
    pub default_delay: Duration,
    /// Per-route delay overrides
    pub route_delay: HashMap<RouteKey, Duration>,
    /// Probability in `[0, 1]` that [`FaultController::should_fail`] returns true
    pub error_probability: f64,
    /// Memory retained on purpose. Released only by [`FaultController::reset`].
    pub leaked_blocks: Vec<Box<[u8]>>,
}

impl FaultConfig {
    fn delay_for(&self, route: &RouteKey) -> Duration {
        self.route_delay
            .get(route)
            .copied()
            .unwrap_or(self.default_delay)
    }

    fn leaked_bytes(&self) -> u64 {
        self.leaked_blocks.iter().map(|b| b.len() as u64).sum()
    }
}

/// Read-only snapshot of the fault configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultStatus {
    /// Default latency in milliseconds
    pub latency_ms: u64,
    /// Per-route latency overrides in milliseconds
    pub route_latency_ms: BTreeMap<String, u64>,
    /// Current error probability
    pub error_rate: f64,
    /// Number of leaked memory blocks
    pub leaked_blocks: usize,
    /// Total size of the leaked memory blocks
    pub leaked_bytes: u64,
}

impl FaultStatus {
    /// Latency override for a route, if any
    #[must_use]
    pub fn route_latency(&self, route: &str) -> Option<u64> {
        self.route_latency_ms.get(route).copied()
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn duration_ms(d: Duration) -> u64 {
    d.as_millis() as u64
}

/// Owner of the fault configuration
#[derive(Debug, Default)]
pub struct FaultController {
    config: RwLock<FaultConfig>,
}

impl FaultController {
    /// Create a controller with no faults configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay applied to all routes without an override
    pub fn set_default_latency(&self, delay: Duration) {
        self.config.write().default_delay = delay;
        info!(latency_ms = duration_ms(delay), "Default latency set");
    }

    /// Set the delay for a single route, overriding the default for it
    pub fn set_route_latency(&self, route: RouteKey, delay: Duration) {
        info!(route = %route, latency_ms = duration_ms(delay), "Route latency set");
        self.config.write().route_delay.insert(route, delay);
    }

    /// Set the error probability, clamped to `[0, 1]`
    ///
    /// NaN is treated as zero.
    pub fn set_error_probability(&self, rate: f64) {
        let clamped = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, 1.0)
        };
        self.config.write().error_probability = clamped;
        info!(error_rate = clamped, "Error probability set");
    }

    /// Current error probability
    pub fn error_probability(&self) -> f64 {
        self.config.read().error_probability
    }

    /// Roll for an induced failure
    ///
    /// Each call is an independent draw from a uniform `[0, 1)` source, so a
    /// probability of 1.0 always fails and 0.0 never does.
    pub fn should_fail(&self) -> bool {
        let probability = self.error_probability();
        probability > 0.0 && rand::random::<f64>() < probability
    }

    /// Delay that [`Self::apply_latency`] would apply to a route
    pub fn latency_for(&self, route: &RouteKey) -> Duration {
        self.config.read().delay_for(route)
    }

    /// Suspend the caller for the route's configured delay
    ///
    /// Uses the runtime timer, so other requests keep running. Returns the
    /// delay that was applied.
    pub async fn apply_latency(&self, route: &RouteKey) -> Duration {
        let delay = self.latency_for(route);
        if !delay.is_zero() {
            debug!(route = %route, latency_ms = duration_ms(delay), "Applying injected latency");
            tokio::time::sleep(delay).await;
        }
        delay
    }

    /// Retain a block of `size_mb` megabytes until the next reset
    ///
    /// This is the memory leak experiment: the block is never read and is
    /// released only by [`Self::reset`]. Returns the number of blocks held.
    ///
    /// The block is filled on the blocking pool, off the async workers.
    pub async fn leak_memory(&self, size_mb: u32) -> Result<usize, ApplicationError> {
        let size = (size_mb as usize).saturating_mul(BYTES_PER_MB);
        let block = tokio::task::spawn_blocking(move || vec![LEAK_FILL; size].into_boxed_slice())
            .await
            .map_err(|e| {
                ApplicationError::Internal(format!("Memory leak allocation failed: {e}"))
            })?;

        let mut config = self.config.write();
        config.leaked_blocks.push(block);
        let count = config.leaked_blocks.len();
        drop(config);

        warn!(size_mb, blocks = count, "Leaked memory block retained");
        Ok(count)
    }

    /// Clear every fault and release the leaked memory
    pub fn reset(&self) {
        let released = std::mem::take(&mut *self.config.write());
        info!(
            released_blocks = released.leaked_blocks.len(),
            "Fault configuration reset"
        );
        // `released` is dropped here, outside the lock
    }

    /// Snapshot of the current configuration
    pub fn status(&self) -> FaultStatus {
        let config = self.config.read();
        FaultStatus {
            latency_ms: duration_ms(config.default_delay),
            route_latency_ms: config
                .route_delay
                .iter()
                .map(|(route, delay)| (route.to_string(), duration_ms(*delay)))
                .collect(),
            error_rate: config.error_probability,
            leaked_blocks: config.leaked_blocks.len(),
            leaked_bytes: config.leaked_bytes(),
        }
    }
}
