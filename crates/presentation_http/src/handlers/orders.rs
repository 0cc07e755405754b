//! Order endpoint handlers
//!
//! Each handler only extracts and validates input; fault injection and
//! fabrication happen in [`application::OrderService`].

use application::ApplicationError;
use axum::{
    Json,
    extract::{Path, State},
};
use domain::{CreatedOrder, NewOrder, OrderDetail, OrderPage, OrderStatus, StatusChange};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, ValidatedQuery},
    state::AppState,
};

const fn default_limit() -> u32 {
    10
}

/// Query parameters of `GET /orders`
#[derive(Debug, Deserialize, Validate)]
pub struct ListOrdersQuery {
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    pub limit: u32,

    /// Index of the first order
    #[serde(default)]
    pub offset: u32,

    /// Force a database failure
    #[serde(default)]
    pub fail: bool,
}

/// Body of `PUT /orders/{order_id}/status`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusUpdate {
    /// One of `pending`, `processing`, `completed`, `cancelled`
    pub status: String,
}

impl StatusUpdate {
    /// Parse the requested status
    pub fn parsed(&self) -> Result<OrderStatus, ApplicationError> {
        Ok(self.status.parse::<OrderStatus>()?)
    }
}

/// List a page of orders
pub async fn list_orders(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListOrdersQuery>,
) -> Result<Json<OrderPage>, ApiError> {
    let page = state
        .orders
        .list_orders(query.limit, query.offset, query.fail)
        .await?;
    Ok(Json(page))
}

/// Create an order
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(order): ValidatedJson<NewOrder>,
) -> Result<Json<CreatedOrder>, ApiError> {
    Ok(Json(state.orders.create_order(order).await?))
}

/// Get a single order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetail>, ApiError> {
    Ok(Json(state.orders.get_order(&order_id).await?))
}

/// Change the status of an order
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> Result<Json<StatusChange>, ApiError> {
    let status = update.parsed()?;
    Ok(Json(state.orders.update_status(&order_id, status).await?))
}
