//! Composable expense filters
//!
//! Every criterion is optional. Set criteria combine with AND, so the order in
//! which they are set or applied never matters and the empty filter keeps
//! everything.

use chrono::NaiveDate;

use crate::models::{Expense, ExpenseCategory, Money, Month};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<ExpenseCategory>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    pub month: Option<Month>,
    /// Inclusive lower amount bound
    pub min_amount: Option<Money>,
    /// Inclusive upper amount bound
    pub max_amount: Option<Money>,
    /// Case-insensitive substring of description or notes
    pub search: Option<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn min_amount(mut self, amount: Money) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn max_amount(mut self, amount: Money) -> Self {
        self.max_amount = Some(amount);
        self
    }

    /// Blank search text is treated as no search
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if self.category.is_some_and(|c| c != expense.category) {
            return false;
        }
        if self.from.is_some_and(|d| expense.date < d) {
            return false;
        }
        if self.to.is_some_and(|d| expense.date > d) {
            return false;
        }
        if self.month.is_some_and(|m| !m.contains(expense.date)) {
            return false;
        }
        if self.min_amount.is_some_and(|m| expense.amount < m) {
            return false;
        }
        if self.max_amount.is_some_and(|m| expense.amount > m) {
            return false;
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let in_description = expense.description.to_lowercase().contains(&needle);
            let in_notes = expense
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !in_description && !in_notes {
                return false;
            }
        }
        true
    }

    /// Keep matching expenses, preserving input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        if self.is_empty() {
            return expenses.to_vec();
        }
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
