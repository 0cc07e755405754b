//! Route key value object
//!
//! A route key is the normalized template of a request path, e.g.
//! `/orders/{order_id}/status` for `/orders/ORD-0042/status`. It labels
//! metric series and selects per-route fault overrides, so concrete path
//! parameters never leak into label cardinality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One segment of a route pattern
#[derive(Debug, Clone, Copy)]
enum Segment {
    /// Must equal the given text
    Literal(&'static str),
    /// Any non-empty segment
    Param,
}

/// A path pattern and the template it normalizes to
#[derive(Debug)]
struct RoutePattern {
    segments: &'static [Segment],
    template: &'static str,
}

impl RoutePattern {
    fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let mut parts = rest.split('/');

        for segment in self.segments {
            match (segment, parts.next()) {
                (Segment::Literal(expected), Some(part)) if part == *expected => {},
                (Segment::Param, Some(part)) if !part.is_empty() => {},
                _ => return false,
            }
        }

        parts.next().is_none()
    }
}

/// Patterns are checked in order; the first match wins.
const PATTERNS: &[RoutePattern] = &[
    RoutePattern {
        segments: &[
            Segment::Literal("orders"),
            Segment::Param,
            Segment::Literal("status"),
        ],
        template: RouteKey::ORDER_STATUS,
    },
    RoutePattern {
        segments: &[Segment::Literal("orders"), Segment::Param],
        template: RouteKey::ORDER,
    },
    RoutePattern {
        segments: &[Segment::Literal("customers"), Segment::Param],
        template: RouteKey::CUSTOMER,
    },
];

/// Normalized route template used for metric labels and fault lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    /// Template for the order status update route
    pub const ORDER_STATUS: &'static str = "/orders/{order_id}/status";
    /// Template for the single order route
    pub const ORDER: &'static str = "/orders/{order_id}";
    /// Template for the single customer route
    pub const CUSTOMER: &'static str = "/customers/{customer_id}";
    /// The order collection route
    pub const ORDERS: &'static str = "/orders";
    /// The search route
    pub const SEARCH: &'static str = "/search";

    /// Routes whose handlers apply injected latency and failures
    pub const FAULT_INJECTED: [&'static str; 4] =
        [Self::ORDERS, Self::ORDER, Self::ORDER_STATUS, Self::SEARCH];

    /// Create a route key from an already-normalized template
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Normalize a concrete request path to its route key
    ///
    /// Paths that match no known pattern are used verbatim.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        PATTERNS
            .iter()
            .find(|pattern| pattern.matches(path))
            .map_or_else(|| Self(path.to_string()), |p| Self(p.template.to_string()))
    }

    /// Route key of the search endpoint
    #[must_use]
    pub fn search() -> Self {
        Self::new(Self::SEARCH)
    }

    /// Whether a handler on this route consults the fault controller
    #[must_use]
    pub fn is_fault_injected(&self) -> bool {
        Self::FAULT_INJECTED.contains(&self.as_str())
    }

    /// Get the template as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the template string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteKey {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_status_path_normalizes() {
        let key = RouteKey::from_path("/orders/ORD-0042/status");
        assert_eq!(key.as_str(), RouteKey::ORDER_STATUS);
    }

    #[test]
    fn single_order_path_normalizes() {
        let key = RouteKey::from_path("/orders/ORD-0042");
        assert_eq!(key.as_str(), RouteKey::ORDER);
    }

    #[test]
    fn customer_path_normalizes() {
        let key = RouteKey::from_path("/customers/CUST-007");
        assert_eq!(key.as_str(), RouteKey::CUSTOMER);
    }

    #[test]
    fn collection_path_is_kept() {
        assert_eq!(RouteKey::from_path("/orders").as_str(), "/orders");
        assert_eq!(RouteKey::from_path("/search").as_str(), "/search");
        assert_eq!(RouteKey::from_path("/").as_str(), "/");
    }

    #[test]
    fn trailing_slash_does_not_match_template() {
        assert_eq!(RouteKey::from_path("/orders/").as_str(), "/orders/");
        assert_eq!(RouteKey::from_path("/orders/abc/").as_str(), "/orders/abc/");
    }

    #[test]
    fn deeper_order_paths_are_kept_raw() {
        let path = "/orders/abc/items/3";
        assert_eq!(RouteKey::from_path(path).as_str(), path);
    }

    #[test]
    fn status_pattern_wins_over_single_order() {
        // "/orders/status" is a single order whose id happens to be "status"
        assert_eq!(
            RouteKey::from_path("/orders/status").as_str(),
            RouteKey::ORDER
        );
        assert_eq!(
            RouteKey::from_path("/orders/status/status").as_str(),
            RouteKey::ORDER_STATUS
        );
    }

    #[test]
    fn only_business_routes_take_faults() {
        assert!(RouteKey::from_path("/orders").is_fault_injected());
        assert!(RouteKey::from_path("/orders/ORD-0001").is_fault_injected());
        assert!(RouteKey::from_path("/orders/ORD-0001/status").is_fault_injected());
        assert!(RouteKey::search().is_fault_injected());

        assert!(!RouteKey::from_path("/").is_fault_injected());
        assert!(!RouteKey::from_path("/health").is_fault_injected());
        assert!(!RouteKey::from_path("/customers/CUST-001").is_fault_injected());
        assert!(!RouteKey::from_path("/chaos/status").is_fault_injected());
    }

    #[test]
    fn display_and_serde_are_transparent() {
        let key = RouteKey::search();
        assert_eq!(key.to_string(), "/search");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"/search\"");
    }

    proptest! {
        #[test]
        fn any_order_id_maps_to_order_template(id in "[A-Za-z0-9_-]{1,24}") {
            let key = RouteKey::from_path(&format!("/orders/{id}"));
            prop_assert_eq!(key.as_str(), RouteKey::ORDER);
        }

        #[test]
        fn any_order_id_status_maps_to_status_template(id in "[A-Za-z0-9_-]{1,24}") {
            let key = RouteKey::from_path(&format!("/orders/{id}/status"));
            prop_assert_eq!(key.as_str(), RouteKey::ORDER_STATUS);
        }

        #[test]
        fn unknown_prefixes_map_to_raw_path(rest in "[a-z]{1,12}(/[a-z0-9]{1,8}){0,3}") {
            prop_assume!(!rest.starts_with("orders") && !rest.starts_with("customers"));
            let path = format!("/{rest}");
            let key = RouteKey::from_path(&path);
            prop_assert_eq!(key.as_str(), path.as_str());
        }
    }
}
