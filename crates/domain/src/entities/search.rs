//! Search results

use serde::{Deserialize, Serialize};

use crate::OrderStatus;

/// A single search match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: OrderStatus,
    /// Relevance score in [0, 1], two decimal places
    pub relevance: f64,
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub total: usize,
}

impl SearchResults {
    /// Build results for a query; `total` always equals the number of hits
    #[must_use]
    pub fn new(query: impl Into<String>, results: Vec<SearchHit>) -> Self {
        let total = results.len();
        Self {
            query: query.into(),
            results,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_matches_result_count() {
        let hit = SearchHit {
            id: "ORD-0001".to_string(),
            customer_id: "CUST-001".to_string(),
            amount: 10.0,
            status: OrderStatus::Pending,
            relevance: 0.5,
        };
        let results = SearchResults::new("widget", vec![hit.clone(), hit]);
        assert_eq!(results.total, 2);
        assert_eq!(results.query, "widget");
    }
}
