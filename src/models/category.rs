//! Expense categories
//!
//! The category set is closed: every expense belongs to exactly one of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Health,
    Education,
    Utilities,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub const ALL: [ExpenseCategory; 8] = [
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Shopping,
        Self::Health,
        Self::Education,
        Self::Utilities,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    /// Parse a category name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Result<Self, CategoryParseError> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error for an unknown category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ExpenseCategory::parse("food").unwrap(), ExpenseCategory::Food);
        assert_eq!(
            ExpenseCategory::parse("  UTILITIES ").unwrap(),
            ExpenseCategory::Utilities
        );
        assert!(ExpenseCategory::parse("Groceries").is_err());
    }

    #[test]
    fn test_every_name_round_trips() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::parse(category.name()).unwrap(), category);
        }
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&ExpenseCategory::Health).unwrap();
        assert_eq!(json, "\"Health\"");
    }
}
