//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Injected faults surface through these variants with a fixed message per
/// endpoint. None of them is retried.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dependent service unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        assert_eq!(
            ApplicationError::NotFound("Order not found".to_string()).to_string(),
            "Not found: Order not found"
        );
        assert_eq!(
            ApplicationError::ServiceUnavailable("down".to_string()).to_string(),
            "Service unavailable: down"
        );
        assert_eq!(
            ApplicationError::Internal("Database error".to_string()).to_string(),
            "Internal error: Database error"
        );
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidStatus("x".to_string()).into();
        assert_eq!(err.to_string(), "Invalid order status: x");
    }
}
