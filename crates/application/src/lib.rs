//! Application layer - Use cases and orchestration
//!
//! Holds the fault controller that drives chaos experiments, the metrics
//! port the service reports through, and the order use cases that apply
//! injected faults before fabricating their responses.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
