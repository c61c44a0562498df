//! Notification categories and priorities.
//!
//! The category is the semantic classification of a notification and is
//! what channel-eligibility rules key on. The string forms below must match
//! the values stored in the `notifications.category` and
//! `notifications.priority` columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Semantic classification of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Attendance,
    Leave,
    System,
    Marketing,
}

impl Category {
    /// Every known category, in a stable order.
    pub const ALL: [Category; 4] = [
        Category::Attendance,
        Category::Leave,
        Category::System,
        Category::Marketing,
    ];

    /// The column value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Attendance => "attendance",
            Category::Leave => "leave",
            Category::System => "system",
            Category::Marketing => "marketing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attendance" => Ok(Category::Attendance),
            "leave" => Ok(Category::Leave),
            "system" => Ok(Category::System),
            "marketing" => Ok(Category::Marketing),
            other => Err(CoreError::Validation(format!(
                "Unknown notification category: {other}"
            ))),
        }
    }
}

/// Delivery urgency of a notification.
///
/// `Urgent` notifications bypass quiet hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// The column value for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(CoreError::Validation(format!(
                "Unknown notification priority: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_a_validation_error() {
        let err = "weather".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Unknown notification category"));
    }

    #[test]
    fn priority_defaults_to_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn category_serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Attendance).unwrap();
        assert_eq!(json, "\"attendance\"");
        let back: Category = serde_json::from_str("\"marketing\"").unwrap();
        assert_eq!(back, Category::Marketing);
    }
}
