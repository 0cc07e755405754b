//! Entities and value records returned by the order endpoints
//!
//! None of these carry identity across requests; every instance is built
//! fresh for the response it belongs to.

mod order;
mod search;

pub use order::{
    CREATED_STATUS, CreatedOrder, NewOrder, OrderDetail, OrderItem, OrderPage, OrderSummary,
    StatusChange,
};
pub use search::{SearchHit, SearchResults};
