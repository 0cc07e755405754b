//! Order search handler

use axum::{Json, extract::State};
use domain::SearchResults;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedQuery, state::AppState};

/// Query parameters of `GET /search`
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search orders
pub async fn search_orders(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    Ok(Json(state.orders.search(&query.q).await?))
}
