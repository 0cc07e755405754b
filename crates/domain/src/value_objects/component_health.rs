//! Health of a simulated backing component

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported health of a dependency such as the database or cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    #[default]
    Healthy,
    Degraded,
    Unhealthy,
}

impl ComponentHealth {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for ComponentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_healthy_is_healthy() {
        assert!(ComponentHealth::Healthy.is_healthy());
        assert!(!ComponentHealth::Degraded.is_healthy());
        assert!(!ComponentHealth::Unhealthy.is_healthy());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ComponentHealth::Degraded).unwrap();
        assert_eq!(json, "\"degraded\"");
    }
}
