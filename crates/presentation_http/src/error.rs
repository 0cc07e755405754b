//! API error handling
//!
//! Induced faults are test signals, so their messages reach the client
//! unchanged.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.message().to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::Validation(e.to_string()),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ServiceUnavailable(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn induced_failure_message_is_verbatim() {
        let err: ApiError =
            ApplicationError::Internal("Database connection failed".to_string()).into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Database connection failed");
        assert_eq!(body.code, "internal_error");
    }

    #[tokio::test]
    async fn service_unavailable_maps_to_503() {
        let err: ApiError = ApplicationError::ServiceUnavailable(
            "Service temporarily unavailable".to_string(),
        )
        .into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.code, "service_unavailable");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let err: ApiError = ApplicationError::NotFound("Order not found".to_string()).into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Order not found");
    }

    #[tokio::test]
    async fn domain_errors_map_to_422() {
        let err: ApiError = ApplicationError::Domain(domain::DomainError::InvalidStatus(
            "shipped".to_string(),
        ))
        .into();
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "Invalid order status: shipped");
        assert_eq!(body.code, "validation_error");
    }
}
