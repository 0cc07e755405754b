//! Application services

pub mod fault_controller;
pub mod health_service;
pub mod order_fabricator;
pub mod order_service;

pub use fault_controller::{FaultConfig, FaultController, FaultStatus};
pub use health_service::{HealthReport, HealthService};
pub use order_fabricator::OrderFabricator;
pub use order_service::{OrderService, SimulationConfig};
