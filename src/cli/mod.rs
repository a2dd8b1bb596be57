//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Every handler except
//! `auth` runs on behalf of the user resolved from the stored session token.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod income;
pub mod report;

pub use auth::{current_user, handle_auth_command, AuthCommands, PASSWORD_ENV};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands, FilterArgs};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{Local, NaiveDate};

use crate::error::SpendbookResult;
use crate::models::Month;
use crate::services::{parse_date, parse_month};

/// `--month`, defaulting to the current month
pub(crate) fn month_or_current(input: Option<&str>) -> SpendbookResult<Month> {
    match input {
        Some(month) => parse_month(month),
        None => Ok(Month::current()),
    }
}

/// `--date`, defaulting to today
pub(crate) fn date_or_today(input: Option<&str>) -> SpendbookResult<NaiveDate> {
    match input {
        Some(date) => parse_date(date),
        None => Ok(Local::now().date_naive()),
    }
}
