//! Value Objects - Immutable, identity-less domain primitives

mod component_health;
mod identifiers;
mod order_status;
mod route_key;

pub use component_health::ComponentHealth;
pub use identifiers::{customer_id, order_id, product_id, round_amount};
pub use order_status::OrderStatus;
pub use route_key::RouteKey;
