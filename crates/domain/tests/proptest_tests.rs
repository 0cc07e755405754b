//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{NewOrder, OrderStatus, RouteKey, customer_id, order_id, round_amount};
use proptest::prelude::*;
use validator::Validate;

fn any_status() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL.to_vec())
}

// ============================================================================
// OrderStatus Property Tests
// ============================================================================

mod order_status_tests {
    use super::*;

    proptest! {
        #[test]
        fn display_parses_back(status in any_status()) {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            prop_assert_eq!(parsed, status);
        }

        #[test]
        fn transition_label_joins_both_states(from in any_status(), to in any_status()) {
            let label = OrderStatus::transition_label(from, to);
            prop_assert_eq!(label, format!("{}_to_{}", from.as_str(), to.as_str()));
        }

        #[test]
        fn unknown_words_are_rejected(word in "[a-z]{1,12}") {
            prop_assume!(OrderStatus::ALL.iter().all(|s| s.as_str() != word));
            prop_assert!(word.parse::<OrderStatus>().is_err());
        }
    }
}

// ============================================================================
// Identifier Property Tests
// ============================================================================

mod identifier_tests {
    use super::*;

    proptest! {
        #[test]
        fn order_ids_have_at_least_four_digits(n in 0u64..100_000) {
            let id = order_id(n);
            let digits = id.strip_prefix("ORD-").unwrap();
            prop_assert!(digits.len() >= 4);
            prop_assert_eq!(digits.parse::<u64>().unwrap(), n);
        }

        #[test]
        fn customer_ids_in_fabricated_range_are_fixed_width(n in 1u32..=100) {
            prop_assert!(customer_id(n).len() >= "CUST-000".len());
        }

        #[test]
        fn rounded_amounts_have_two_decimals(amount in 10.0f64..=500.0) {
            let rounded = round_amount(amount);
            prop_assert!((rounded - amount).abs() <= 0.005 + f64::EPSILON);
            prop_assert!(((rounded * 100.0).round() - rounded * 100.0).abs() < 1e-6);
        }
    }
}

// ============================================================================
// RouteKey Property Tests
// ============================================================================

mod route_key_tests {
    use super::*;

    proptest! {
        #[test]
        fn customer_paths_map_to_template(id in "[A-Za-z0-9-]{1,16}") {
            let key = RouteKey::from_path(&format!("/customers/{id}"));
            prop_assert_eq!(key.as_str(), RouteKey::CUSTOMER);
        }

        #[test]
        fn normalization_is_idempotent(path in "(/[a-z0-9-]{1,8}){1,4}") {
            let once = RouteKey::from_path(&path);
            let twice = RouteKey::from_path(once.as_str());
            prop_assert_eq!(once, twice);
        }
    }
}

// ============================================================================
// NewOrder Property Tests
// ============================================================================

mod new_order_tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_amounts_validate(
            amount in 0.01f64..1_000_000.0,
            customer in "[A-Z0-9-]{1,12}",
        ) {
            let order = NewOrder { customer_id: customer, amount, items: Vec::new() };
            prop_assert!(order.validate().is_ok());
        }

        #[test]
        fn non_positive_amounts_fail(amount in -1_000_000.0f64..=0.0) {
            let order = NewOrder { customer_id: "CUST-001".to_string(), amount, items: Vec::new() };
            prop_assert!(order.validate().is_err());
        }
    }
}
