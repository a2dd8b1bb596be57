//! Expense model
//!
//! A single spend event owned by one user, optionally pointing at one of that
//! user's monthly budgets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::{BudgetId, ExpenseId, UserId};
use super::money::Money;
use super::month::Month;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Owning user
    pub owner: UserId,

    /// Amount spent, always positive
    pub amount: Money,

    pub category: ExpenseCategory,

    /// Short free-text label, required
    pub description: String,

    /// Calendar date of the spend
    pub date: NaiveDate,

    /// Longer free text, searched alongside the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Optional link to a monthly budget. May dangle after the budget is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        owner: UserId,
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            owner,
            amount,
            category,
            description: description.into(),
            date,
            notes: None,
            budget_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The month this expense counts towards
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    /// Validate field-level invariants
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::MissingDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.category
        )
    }
}

/// Partial update for an expense; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    /// `Some(None)` unlinks the budget
    pub budget_id: Option<Option<BudgetId>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.notes.is_none()
            && self.budget_id.is_none()
    }

    /// Apply the patch in place, returning a summary of changed fields
    pub fn apply_to(&self, expense: &mut Expense) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(amount) = self.amount {
            if amount != expense.amount {
                changes.push(format!("amount: {} -> {}", expense.amount, amount));
                expense.amount = amount;
            }
        }
        if let Some(category) = self.category {
            if category != expense.category {
                changes.push(format!("category: {} -> {}", expense.category, category));
                expense.category = category;
            }
        }
        if let Some(description) = &self.description {
            if *description != expense.description {
                changes.push(format!(
                    "description: '{}' -> '{}'",
                    expense.description, description
                ));
                expense.description = description.clone();
            }
        }
        if let Some(date) = self.date {
            if date != expense.date {
                changes.push(format!("date: {} -> {}", expense.date, date));
                expense.date = date;
            }
        }
        if let Some(notes) = &self.notes {
            if *notes != expense.notes {
                changes.push("notes changed".to_string());
                expense.notes = notes.clone();
            }
        }
        if let Some(budget_id) = self.budget_id {
            if budget_id != expense.budget_id {
                changes.push(format!(
                    "budget: {} -> {}",
                    format_link(expense.budget_id),
                    format_link(budget_id)
                ));
                expense.budget_id = budget_id;
            }
        }

        if !changes.is_empty() {
            expense.updated_at = Utc::now();
        }
        changes
    }
}

fn format_link(id: Option<BudgetId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    MissingDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::MissingDescription => write!(f, "Expense description is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
