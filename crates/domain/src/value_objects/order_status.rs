//! Order status value object
//!
//! Represents where an order is in its lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Order status indicating its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order received, not yet worked on
    #[default]
    Pending,
    /// Order is being processed
    Processing,
    /// Order is completed
    Completed,
    /// Order is cancelled
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Check if the order is done (completed or cancelled)
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Label describing a transition, e.g. `pending_to_completed`
    #[must_use]
    pub fn transition_label(from: Self, to: Self) -> String {
        format!("{}_to_{}", from.as_str(), to.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_value() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(s) if s == "shipped"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Completed".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: OrderStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, OrderStatus::Processing);
        assert!(serde_json::from_str::<OrderStatus>("\"unknown\"").is_err());
    }

    #[test]
    fn final_statuses() {
        assert!(OrderStatus::Completed.is_final());
        assert!(OrderStatus::Cancelled.is_final());
        assert!(!OrderStatus::Pending.is_final());
        assert!(!OrderStatus::Processing.is_final());
    }

    #[test]
    fn transition_label_format() {
        let label = OrderStatus::transition_label(OrderStatus::Pending, OrderStatus::Completed);
        assert_eq!(label, "pending_to_completed");
    }
}
