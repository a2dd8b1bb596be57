//! Budget usage
//!
//! How much of a monthly cap has been spent. Expenses count towards a budget
//! when their own date falls in the budget's month; an expense's budget link is
//! never consulted here.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{Expense, Money, Month, MonthlyBudget};

/// Usage above this percentage is a warning
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Usage above this percentage is over/critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Status band derived from a usage percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// `<= 75%`
    OnTrack,
    /// `> 75%` and `<= 90%`
    Warning,
    /// `> 90%`
    Over,
}

impl BudgetStatus {
    pub fn from_percentage(used_percentage: f64) -> Self {
        if used_percentage > CRITICAL_THRESHOLD {
            Self::Over
        } else if used_percentage > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Spend-to-date against a budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub spent: Money,
    /// `max_amount - spent`; negative when overspent
    pub remaining_amount: Money,
    /// Unclamped; may exceed 100
    pub used_percentage: f64,
}

impl BudgetUsage {
    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::from_percentage(self.used_percentage)
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining_amount.is_negative()
    }

    /// Percentage clamped to `[0, 100]` for progress bars
    pub fn progress_percentage(&self) -> f64 {
        self.used_percentage.clamp(0.0, 100.0)
    }
}

/// `spent / cap * 100`, or `0` when the cap is not positive
pub fn usage_percentage(spent: Money, cap: Money) -> f64 {
    if !cap.is_positive() {
        return 0.0;
    }
    // multiply first so round figures stay exact (320/500 -> 64.0)
    spent.cents() as f64 * 100.0 / cap.cents() as f64
}

/// Compute usage of `budget` from a caller-supplied expense set.
///
/// Only expenses dated inside `budget.month` are summed, regardless of which
/// budget (if any) they link to.
pub fn compute_usage<'a, I>(budget: &MonthlyBudget, expenses: I) -> BudgetUsage
where
    I: IntoIterator<Item = &'a Expense>,
{
    let spent: Money = expenses
        .into_iter()
        .filter(|e| budget.month.contains(e.date))
        .map(|e| e.amount)
        .sum();

    BudgetUsage {
        spent,
        remaining_amount: budget.max_amount - spent,
        used_percentage: usage_percentage(spent, budget.max_amount),
    }
}

/// How much can still be spent per day for the rest of `month`.
///
/// `None` once the month is over or nothing remains.
pub fn daily_allowance(usage: &BudgetUsage, month: Month, today: NaiveDate) -> Option<Money> {
    if !usage.remaining_amount.is_positive() || today > month.last_day() {
        return None;
    }
    let days_left = if today < month.first_day() {
        month.days() as i64
    } else {
        (month.last_day() - today).num_days() + 1
    };
    usage.remaining_amount.split_evenly(days_left as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, UserId};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(owner: UserId, units: i64, on: &str) -> Expense {
        Expense::new(
            owner,
            Money::from_units(units),
            ExpenseCategory::Food,
            "shop",
            date(on),
        )
    }

    fn groceries(owner: UserId) -> MonthlyBudget {
        MonthlyBudget::new(
            owner,
            "Groceries",
            Money::from_units(500),
            Month::parse("2025-06").unwrap(),
        )
    }

    #[test]
    fn test_groceries_scenario() {
        let owner = UserId::new();
        let budget = groceries(owner);
        let expenses = vec![
            expense(owner, 120, "2025-06-03"),
            expense(owner, 200, "2025-06-20"),
            expense(owner, 50, "2025-07-01"),
        ];

        let usage = compute_usage(&budget, &expenses);
        assert_eq!(usage.spent, Money::from_units(320));
        assert_eq!(usage.remaining_amount, Money::from_units(180));
        assert_eq!(usage.used_percentage, 64.0);
        assert_eq!(usage.status(), BudgetStatus::OnTrack);
    }

    #[test]
    fn test_empty_expenses() {
        let budget = groceries(UserId::new());
        let usage = compute_usage(&budget, &[]);
        assert_eq!(usage.spent, Money::zero());
        assert_eq!(usage.remaining_amount, budget.max_amount);
        assert_eq!(usage.used_percentage, 0.0);
    }

    #[test]
    fn test_budget_link_is_ignored() {
        let owner = UserId::new();
        let budget = groceries(owner);
        let other = groceries(owner);

        let mut linked_elsewhere = expense(owner, 100, "2025-06-10");
        linked_elsewhere.budget_id = Some(other.id);
        let mut linked_here_wrong_month = expense(owner, 40, "2025-05-31");
        linked_here_wrong_month.budget_id = Some(budget.id);

        let usage = compute_usage(&budget, &[linked_elsewhere, linked_here_wrong_month]);
        assert_eq!(usage.spent, Money::from_units(100));
    }

    #[test]
    fn test_huge_stored_amounts_do_not_overflow() {
        let owner = UserId::new();
        let budget = groceries(owner);
        let mut big = expense(owner, 1, "2025-06-10");
        big.amount = Money::from_cents(i64::MAX - 1);

        let usage = compute_usage(&budget, &[big.clone(), big]);
        assert_eq!(usage.spent, Money::from_cents(i64::MAX));
        assert!(usage.is_overspent());
        assert_eq!(usage.status(), BudgetStatus::Over);
    }

    #[test]
    fn test_overspend_is_not_clamped() {
        let owner = UserId::new();
        let budget = groceries(owner);
        let usage = compute_usage(&budget, &[expense(owner, 600, "2025-06-15")]);
        assert_eq!(usage.remaining_amount, Money::from_units(-100));
        assert_eq!(usage.used_percentage, 120.0);
        assert!(usage.is_overspent());
        assert_eq!(usage.progress_percentage(), 100.0);
        assert_eq!(usage.status(), BudgetStatus::Over);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(BudgetStatus::from_percentage(0.0), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::from_percentage(75.0), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::from_percentage(75.01), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percentage(90.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percentage(90.5), BudgetStatus::Over);
        assert_eq!(BudgetStatus::from_percentage(250.0), BudgetStatus::Over);
    }

    #[test]
    fn test_usage_percentage_zero_cap() {
        assert_eq!(usage_percentage(Money::from_units(10), Money::zero()), 0.0);
    }

    #[test]
    fn test_daily_allowance() {
        let june = Month::parse("2025-06").unwrap();
        let usage = BudgetUsage {
            spent: Money::from_units(200),
            remaining_amount: Money::from_units(300),
            used_percentage: 40.0,
        };

        // 21st..30th inclusive is 10 days
        assert_eq!(
            daily_allowance(&usage, june, date("2025-06-21")),
            Some(Money::from_units(30))
        );
        // before the month: spread over all 30 days
        assert_eq!(
            daily_allowance(&usage, june, date("2025-05-15")),
            Some(Money::from_units(10))
        );
        assert_eq!(daily_allowance(&usage, june, date("2025-07-01")), None);

        let spent_out = BudgetUsage {
            remaining_amount: Money::zero(),
            ..usage
        };
        assert_eq!(daily_allowance(&spent_out, june, date("2025-06-21")), None);
    }
}
