//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown order status
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
}
