//! Orders API HTTP presentation layer
//!
//! Router, request instrumentation, handlers for the order endpoints and
//! the chaos control surface.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestMetricsLayer, ValidatedJson, ValidatedQuery, ValidationError};
pub use routes::create_router;
pub use state::AppState;
