//! Formatting of fabricated identifiers and amounts

/// Format an order identifier, e.g. `ORD-0042`
#[must_use]
pub fn order_id(n: u64) -> String {
    format!("ORD-{n:04}")
}

/// Format a customer identifier, e.g. `CUST-007`
#[must_use]
pub fn customer_id(n: u32) -> String {
    format!("CUST-{n:03}")
}

/// Format a product identifier, e.g. `PROD-003`
#[must_use]
pub fn product_id(n: u32) -> String {
    format!("PROD-{n:03}")
}

/// Round a monetary amount to cents
#[must_use]
pub fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
