//! Budget CLI commands
//!
//! Monthly spending caps. Budgets are addressed by ID or by name; a name that
//! exists in several months needs `--month` (or the ID) to pick one.

use chrono::Local;
use clap::Subcommand;

use super::month_or_current;
use crate::config::Settings;
use crate::display;
use crate::error::SpendbookResult;
use crate::models::{BudgetPatch, User};
use crate::services::{parse_month, parse_positive_amount, BudgetService};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget for a month
    Create {
        name: String,
        /// Spending cap (e.g. "500" or "500.00")
        max_amount: String,
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets with their usage
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show one budget in detail
    Show {
        /// Budget name or ID
        budget: String,
        /// Month to look the name up in
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Rename, re-cap or move a budget
    Edit {
        /// Budget name or ID
        budget: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 'a', long)]
        max_amount: Option<String>,
        /// Move the budget to this month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget; linked expenses are kept
    Delete {
        /// Budget name or ID
        budget: String,
        /// Month to look the name up in
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: BudgetCommands,
) -> SpendbookResult<()> {
    let service = BudgetService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        BudgetCommands::Create {
            name,
            max_amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let budget =
                service.create(user.id, &name, parse_positive_amount(&max_amount)?, month)?;
            println!(
                "Created budget '{}' for {} with a cap of {} ({})",
                budget.name,
                budget.month,
                display::money(budget.max_amount, settings),
                budget.id
            );
        }

        BudgetCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let summaries = service.summaries(user.id, month, today)?;
            print!("{}", display::format_budget_list(&summaries, settings));
        }

        BudgetCommands::Show { budget, month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let budget = service.find(user.id, &budget, month)?;
            let summary = service.summary(&budget, today)?;
            print!("{}", display::format_budget_details(&summary, settings));
        }

        BudgetCommands::Edit {
            budget,
            name,
            max_amount,
            month,
        } => {
            let budget = service.find(user.id, &budget, None)?;
            let patch = BudgetPatch {
                name,
                max_amount: max_amount
                    .as_deref()
                    .map(parse_positive_amount)
                    .transpose()?,
                month: month.as_deref().map(parse_month).transpose()?,
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let updated = service.update(user.id, budget.id, &patch)?;
            println!("Updated budget '{}' ({})", updated.name, updated.month);
        }

        BudgetCommands::Delete { budget, month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let budget = service.find(user.id, &budget, month)?;
            let deleted = service.delete(user.id, budget.id)?;
            println!("Deleted budget '{}' ({})", deleted.name, deleted.month);
        }
    }

    Ok(())
}
