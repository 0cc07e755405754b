//! Synthetic payload generation
//!
//! Produces plausible looking orders from random parameters. The values
//! carry no meaning and nothing is remembered between calls.

use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::Utc;
use domain::{
    OrderDetail, OrderItem, OrderStatus, OrderSummary, SearchHit, customer_id, order_id,
    product_id, round_amount,
};
use rand::Rng;

const AMOUNT_RANGE: RangeInclusive<f64> = 10.0..=500.0;
const CUSTOMER_RANGE: RangeInclusive<u32> = 1..=100;
const CREATED_ID_RANGE: RangeInclusive<u64> = 1000..=9999;
const SEARCH_ID_RANGE: RangeInclusive<u64> = 1..=9999;
const ITEM_COUNT_RANGE: RangeInclusive<u32> = 1..=5;
const QUANTITY_RANGE: RangeInclusive<u32> = 1..=5;
const SEARCH_HITS_RANGE: RangeInclusive<usize> = 5..=20;

const LISTED_STATUSES: [OrderStatus; 4] = OrderStatus::ALL;
const DETAIL_STATUSES: [OrderStatus; 3] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Completed,
];
const PREVIOUS_STATUSES: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Processing];
const SEARCH_STATUSES: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Completed];

fn pick<T: Copy>(rng: &mut impl Rng, choices: &[T]) -> T {
    choices[rng.random_range(0..choices.len())]
}

fn amount(rng: &mut impl Rng) -> f64 {
    round_amount(rng.random_range(AMOUNT_RANGE))
}

fn customer(rng: &mut impl Rng) -> String {
    customer_id(rng.random_range(CUSTOMER_RANGE))
}

/// Stateless generator of fabricated order data
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFabricator;

impl OrderFabricator {
    /// Create a new fabricator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// One page of orders with sequential ids starting at `offset`
    pub fn order_page(&self, limit: u32, offset: u32) -> Vec<OrderSummary> {
        let mut rng = rand::rng();
        let now = Utc::now();

        (0..limit)
            .map(|i| OrderSummary {
                id: order_id(u64::from(offset) + u64::from(i)),
                customer_id: customer(&mut rng),
                amount: amount(&mut rng),
                status: pick(&mut rng, &LISTED_STATUSES),
                created_at: now,
            })
            .collect()
    }

    /// Detail view for the given id
    pub fn order_detail(&self, id: &str) -> OrderDetail {
        let mut rng = rand::rng();
        let item_count = rng.random_range(ITEM_COUNT_RANGE);

        OrderDetail {
            id: id.to_string(),
            customer_id: customer(&mut rng),
            amount: amount(&mut rng),
            status: pick(&mut rng, &DETAIL_STATUSES),
            created_at: Utc::now(),
            items: (0..item_count)
                .map(|i| OrderItem {
                    product_id: product_id(i),
                    quantity: rng.random_range(QUANTITY_RANGE),
                })
                .collect(),
        }
    }

    /// Identifier for a newly created order
    pub fn created_order_id(&self) -> String {
        order_id(rand::rng().random_range(CREATED_ID_RANGE))
    }

    /// Status an order supposedly had before an update
    pub fn previous_status(&self) -> OrderStatus {
        pick(&mut rand::rng(), &PREVIOUS_STATUSES)
    }

    /// Between 5 and 20 search hits
    pub fn search_hits(&self) -> Vec<SearchHit> {
        let mut rng = rand::rng();
        let count = rng.random_range(SEARCH_HITS_RANGE);

        (0..count)
            .map(|_| SearchHit {
                id: order_id(rng.random_range(SEARCH_ID_RANGE)),
                customer_id: customer(&mut rng),
                amount: amount(&mut rng),
                status: pick(&mut rng, &SEARCH_STATUSES),
                relevance: round_amount(rng.random::<f64>()),
            })
            .collect()
    }

    /// Sample a duration uniformly from `range`
    pub fn processing_time(&self, range: &RangeInclusive<Duration>) -> Duration {
        let (low, high) = (range.start().as_secs_f64(), range.end().as_secs_f64());
        let secs = rand::rng().random_range(low..=high);
        Duration::from_secs_f64(secs)
    }

    /// Roll an independent event with the given probability
    pub fn roll(&self, probability: f64) -> bool {
        probability > 0.0 && rand::rng().random::<f64>() < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_page_has_sequential_ids() {
        let orders = OrderFabricator::new().order_page(3, 40);
        let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["ORD-0040", "ORD-0041", "ORD-0042"]);
    }

    #[test]
    fn order_page_respects_limit() {
        assert!(OrderFabricator::new().order_page(0, 0).is_empty());
        assert_eq!(OrderFabricator::new().order_page(100, 0).len(), 100);
    }

    #[test]
    fn amounts_stay_in_range() {
        for order in OrderFabricator::new().order_page(200, 0) {
            assert!((10.0..=500.0).contains(&order.amount));
            assert!(order.customer_id.starts_with("CUST-"));
        }
    }

    #[test]
    fn detail_keeps_requested_id() {
        let detail = OrderFabricator::new().order_detail("ORD-7777");
        assert_eq!(detail.id, "ORD-7777");
        assert!((1..=5).contains(&detail.items.len()));
        assert!(detail.items.iter().all(|i| (1..=5).contains(&i.quantity)));
        assert_ne!(detail.status, OrderStatus::Cancelled);
    }

    #[test]
    fn previous_status_is_not_final() {
        for _ in 0..50 {
            assert!(!OrderFabricator::new().previous_status().is_final());
        }
    }

    #[test]
    fn search_hit_count_in_range() {
        for _ in 0..50 {
            let hits = OrderFabricator::new().search_hits();
            assert!((5..=20).contains(&hits.len()));
            assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.relevance)));
        }
    }

    #[test]
    fn created_ids_have_four_digits() {
        let id = OrderFabricator::new().created_order_id();
        assert_eq!(id.len(), "ORD-0000".len());
    }

    #[test]
    fn processing_time_within_bounds() {
        let range = Duration::from_millis(10)..=Duration::from_millis(20);
        let sampled = OrderFabricator::new().processing_time(&range);
        assert!(sampled >= Duration::from_millis(9));
        assert!(sampled <= Duration::from_millis(21));
    }

    #[test]
    fn roll_extremes() {
        let fabricator = OrderFabricator::new();
        assert!((0..200).all(|_| fabricator.roll(1.0)));
        assert!(!(0..200).any(|_| fabricator.roll(0.0)));
    }
}
