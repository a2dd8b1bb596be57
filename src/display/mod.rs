//! Display formatting for terminal output

pub mod budget;
pub mod expense;
pub mod report;

pub use budget::{format_budget_details, format_budget_list};
pub use expense::{format_expense_details, format_expense_list, format_income_list};
pub use report::{
    format_category_totals, format_kpis, format_month_totals, format_monthly_summary,
    format_savings_history, money,
};
