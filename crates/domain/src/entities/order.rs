//! Order entities
//!
//! Orders are fabricated per request. Nothing here is stored; an order id
//! seen in one response means nothing to the next request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::OrderStatus;

/// Status reported for a freshly created order
pub const CREATED_STATUS: &str = "created";

/// Order as listed in the collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// One page of the order collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<OrderSummary>,
    /// Size of the simulated collection, independent of the page
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// A line item of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Full view of a single order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Request to create an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrder {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub customer_id: String,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub amount: f64,

    /// Free-form line items, echoed back unchanged
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// Result of creating an order: the request echoed with a generated id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: String,
    pub status: String,
    /// Simulated processing time in seconds
    pub processing_time: f64,
    #[serde(flatten)]
    pub order: NewOrder,
}

/// Result of a status update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: String,
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_order(customer_id: &str, amount: f64) -> NewOrder {
        NewOrder {
            customer_id: customer_id.to_string(),
            amount,
            items: Vec::new(),
        }
    }

    #[test]
    fn valid_new_order_passes() {
        assert!(new_order("CUST-001", 12.5).validate().is_ok());
    }

    #[test]
    fn zero_amount_rejected() {
        let errors = new_order("CUST-001", 0.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn negative_amount_rejected() {
        assert!(new_order("CUST-001", -3.0).validate().is_err());
    }

    #[test]
    fn empty_customer_rejected() {
        let errors = new_order("", 10.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("customer_id"));
    }

    #[test]
    fn items_default_to_empty() {
        let order: NewOrder =
            serde_json::from_value(json!({"customer_id": "CUST-001", "amount": 5.0})).unwrap();
        assert!(order.items.is_empty());
    }

    #[test]
    fn created_order_flattens_request() {
        let created = CreatedOrder {
            id: "ORD-1234".to_string(),
            status: CREATED_STATUS.to_string(),
            processing_time: 0.25,
            order: NewOrder {
                customer_id: "CUST-001".to_string(),
                amount: 42.0,
                items: vec![json!({"sku": "A"})],
            },
        };

        let value = serde_json::to_value(&created).unwrap();
        assert_eq!(value["id"], "ORD-1234");
        assert_eq!(value["status"], "created");
        assert_eq!(value["customer_id"], "CUST-001");
        assert_eq!(value["amount"], 42.0);
        assert_eq!(value["items"][0]["sku"], "A");
    }

    #[test]
    fn status_change_serializes_statuses_lowercase() {
        let change = StatusChange {
            id: "ORD-0001".to_string(),
            old_status: OrderStatus::Pending,
            new_status: OrderStatus::Completed,
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["old_status"], "pending");
        assert_eq!(value["new_status"], "completed");
    }
}
