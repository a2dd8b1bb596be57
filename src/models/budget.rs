//! Monthly budget model
//!
//! A named spending cap for one calendar month. `(owner, name, month)` is unique;
//! the repository enforces that, not this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use super::money::Money;
use super::month::Month;

/// A spending cap for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub id: BudgetId,

    /// Owning user
    pub owner: UserId,

    /// Display name, unique per owner and month regardless of case
    pub name: String,

    /// Spending cap for the month, always positive
    pub max_amount: Money,

    /// The month this cap applies to
    pub month: Month,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MonthlyBudget {
    pub fn new(owner: UserId, name: impl Into<String>, max_amount: Money, month: Month) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            owner,
            name: name.into(),
            max_amount,
            month,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this budget occupies the same uniqueness slot as `(owner, name, month)`.
    /// Names in a slot compare case-insensitively.
    pub fn same_slot(&self, owner: UserId, name: &str, month: Month) -> bool {
        self.owner == owner && self.month == month && self.name_matches(name)
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::MissingName);
        }
        if !self.max_amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveCap);
        }
        Ok(())
    }
}

impl fmt::Display for MonthlyBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): cap {}", self.name, self.month, self.max_amount)
    }
}

/// Partial update for a budget
#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub max_amount: Option<Money>,
    /// Moves the budget; existing expense links are not revalidated
    pub month: Option<Month>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.max_amount.is_none() && self.month.is_none()
    }

    /// Apply the patch, returning a summary of what changed.
    ///
    /// Moving a budget to another month does not touch expenses that link to it.
    pub fn apply_to(&self, budget: &mut MonthlyBudget) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            let name = name.trim();
            if name != budget.name {
                changes.push(format!("name: '{}' -> '{}'", budget.name, name));
                budget.name = name.to_string();
            }
        }
        if let Some(max_amount) = self.max_amount {
            if max_amount != budget.max_amount {
                changes.push(format!("maxAmount: {} -> {}", budget.max_amount, max_amount));
                budget.max_amount = max_amount;
            }
        }
        if let Some(month) = self.month {
            if month != budget.month {
                changes.push(format!("month: {} -> {}", budget.month, month));
                budget.month = month;
            }
        }
        if !changes.is_empty() {
            budget.updated_at = Utc::now();
        }
        changes
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingName,
    NonPositiveCap,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Budget name is required"),
            Self::NonPositiveCap => write!(f, "Budget max amount must be greater than zero"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
