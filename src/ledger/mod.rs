//! Budget ledger and aggregation views
//!
//! Pure computations shared by every consumer: budget usage and status bands,
//! per-category and per-month totals, KPIs, savings rate and expense filters.
//! Nothing here touches storage.

pub mod aggregate;
pub mod filter;
pub mod usage;

pub use aggregate::{
    kpis, monthly_summary, net_balance, savings_rate, top_category, total_by_category,
    total_by_month, total_expenses, total_income, ExpenseKpis, MonthlySummary,
};
pub use filter::ExpenseFilter;
pub use usage::{compute_usage, daily_allowance, BudgetStatus, BudgetUsage};
