//! Aggregation views over expense and income collections
//!
//! Every function here is pure and total: it takes an already-fetched slice and
//! never fails. Callers scope the slices to one owner (and period) first.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Expense, ExpenseCategory, Income, Money, Month};

/// Sum of expense amounts per category.
///
/// Categories with no expenses are absent, not zero.
pub fn total_by_category(expenses: &[Expense]) -> BTreeMap<ExpenseCategory, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// Sum of expense amounts per month, oldest month first
pub fn total_by_month(expenses: &[Expense]) -> Vec<(Month, Money)> {
    let mut totals: BTreeMap<Month, Money> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.month()).or_insert_with(Money::zero) += expense.amount;
    }
    totals.into_iter().collect()
}

/// The category with the largest total.
///
/// Ties go to whichever of the tied categories appears first in `expenses`.
pub fn top_category(expenses: &[Expense]) -> Option<(ExpenseCategory, Money)> {
    let totals = total_by_category(expenses);

    let mut seen = Vec::with_capacity(totals.len());
    for expense in expenses {
        if !seen.contains(&expense.category) {
            seen.push(expense.category);
        }
    }

    let mut best: Option<(ExpenseCategory, Money)> = None;
    for category in seen {
        let amount = totals.get(&category).copied().unwrap_or_default();
        match best {
            Some((_, top)) if amount <= top => {}
            _ => best = Some((category, amount)),
        }
    }
    best
}

/// Headline figures for a set of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpenseKpis {
    pub total: Money,
    pub count: usize,
    pub average_per_expense: Money,
    pub average_per_month: Money,
    pub top_category: Option<(ExpenseCategory, Money)>,
}

/// KPIs for `expenses`; `None` when there is nothing to average
pub fn kpis(expenses: &[Expense]) -> Option<ExpenseKpis> {
    if expenses.is_empty() {
        return None;
    }

    let total = total_expenses(expenses);
    let months: BTreeSet<Month> = expenses.iter().map(Expense::month).collect();

    Some(ExpenseKpis {
        total,
        count: expenses.len(),
        average_per_expense: total.split_evenly(expenses.len() as u64)?,
        average_per_month: total.split_evenly(months.len() as u64)?,
        top_category: top_category(expenses),
    })
}

pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_income(incomes: &[Income]) -> Money {
    incomes.iter().map(|i| i.amount).sum()
}

/// Income minus expenses; the caller restricts both to the same period
pub fn net_balance(incomes: &[Income], expenses: &[Expense]) -> Money {
    total_income(incomes) - total_expenses(expenses)
}

/// Share of income left over, in percent. `0` when there was no income.
pub fn savings_rate(total_income: Money, total_expenses: Money) -> f64 {
    if !total_income.is_positive() {
        return 0.0;
    }
    (total_income - total_expenses).cents() as f64 * 100.0 / total_income.cents() as f64
}

/// Income, spending and savings for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_balance: Money,
    pub savings_rate: f64,
}

/// Summarise `month` from unscoped slices; records outside the month are skipped
pub fn monthly_summary(month: Month, incomes: &[Income], expenses: &[Expense]) -> MonthlySummary {
    let total_income: Money = incomes
        .iter()
        .filter(|i| month.contains(i.date))
        .map(|i| i.amount)
        .sum();
    let total_expenses: Money = expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum();

    MonthlySummary {
        month,
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
    }
}
