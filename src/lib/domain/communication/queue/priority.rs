//! Delivery priority

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// An unrecognised priority label
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct PriorityError(String);

/// Delivery priority of a queued message
///
/// Variants are ordered from most to least urgent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Delivered before anything else
    High,

    /// The default
    #[default]
    Medium,

    /// Delivered once nothing more urgent is waiting
    Low,

    /// Held back and never picked up for delivery
    Deferred,
}

impl Priority {
    /// The lowercase label for this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Deferred => "deferred",
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "deferred" => Ok(Self::Deferred),
            _ => Err(PriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_default_priority_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_parse_is_case_insensitive() -> TestResult {
        assert_eq!(" HIGH ".parse::<Priority>()?, Priority::High);
        assert_eq!("Deferred".parse::<Priority>()?, Priority::Deferred);

        Ok(())
    }

    #[test]
    fn test_parse_unknown_priority() {
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(PriorityError("urgent".to_string()))
        );
    }

    #[test]
    fn test_priorities_order_by_urgency() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert!(Priority::Low < Priority::Deferred);
    }
}
