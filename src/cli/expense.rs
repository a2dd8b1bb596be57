//! Expense CLI commands

use clap::{Args, Subcommand};

use super::date_or_today;
use crate::config::Settings;
use crate::display;
use crate::error::SpendbookResult;
use crate::ledger::ExpenseFilter;
use crate::models::{ExpensePatch, Month, User};
use crate::services::{
    parse_amount, parse_category, parse_date, parse_month, parse_positive_amount, BudgetService,
    ExpenseService, NewExpense,
};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Food, Transportation, Entertainment, Shopping, Health, Education, Utilities or Other
        category: String,
        description: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Budget name or ID to link, from the month of the expense
        #[arg(short, long)]
        budget: Option<String>,
    },

    /// List expenses, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// New notes; an empty string clears them
        #[arg(short, long)]
        notes: Option<String>,
        /// Budget name or ID to link
        #[arg(short, long, conflicts_with = "unlink")]
        budget: Option<String>,
        /// Remove the budget link
        #[arg(long)]
        unlink: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Expense filter flags shared by `expense list` and the reports
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(short, long)]
    pub category: Option<String>,
    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,
    /// Only this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
    /// Smallest amount (inclusive)
    #[arg(long)]
    pub min: Option<String>,
    /// Largest amount (inclusive)
    #[arg(long)]
    pub max: Option<String>,
    /// Text to look for in description and notes
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> SpendbookResult<ExpenseFilter> {
        let mut filter = ExpenseFilter::new();
        if let Some(category) = &self.category {
            filter = filter.category(parse_category(category)?);
        }
        if let Some(from) = &self.from {
            filter = filter.from(parse_date(from)?);
        }
        if let Some(to) = &self.to {
            filter = filter.to(parse_date(to)?);
        }
        if let Some(month) = &self.month {
            filter = filter.month(parse_month(month)?);
        }
        if let Some(min) = &self.min {
            filter = filter.min_amount(parse_amount(min)?);
        }
        if let Some(max) = &self.max {
            filter = filter.max_amount(parse_amount(max)?);
        }
        if let Some(search) = &self.search {
            filter = filter.search(search.as_str());
        }
        Ok(filter)
    }
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ExpenseCommands,
) -> SpendbookResult<()> {
    let service = ExpenseService::new(storage);
    let budgets = BudgetService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
            notes,
            budget,
        } => {
            let date = date_or_today(date.as_deref())?;
            let mut input = NewExpense::new(
                parse_positive_amount(&amount)?,
                parse_category(&category)?,
                description,
                date,
            );
            input.notes = notes;
            if let Some(budget) = budget {
                input.budget_id = Some(budgets.find(user.id, &budget, Some(Month::of(date)))?.id);
            }

            let expense = service.create(user.id, input)?;
            println!(
                "Recorded {} for {} ({})",
                display::money(expense.amount, settings),
                expense.description,
                expense.id
            );
        }

        ExpenseCommands::List { filter } => {
            let expenses = service.list(user.id, &filter.to_filter()?)?;
            print!("{}", display::format_expense_list(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(user.id, &id)?;
            let budget = service.linked_budget(&expense)?;
            print!(
                "{}",
                display::format_expense_details(&expense, budget.as_ref(), settings)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
            notes,
            budget,
            unlink,
        } => {
            let expense = service.find(user.id, &id)?;

            let mut patch = ExpensePatch {
                amount: amount.as_deref().map(parse_positive_amount).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                description,
                date: date.as_deref().map(parse_date).transpose()?,
                notes: notes.map(Some),
                budget_id: None,
            };
            if unlink {
                patch.budget_id = Some(None);
            } else if let Some(budget) = budget {
                let month = Month::of(patch.date.unwrap_or(expense.date));
                patch.budget_id = Some(Some(budgets.find(user.id, &budget, Some(month))?.id));
            }

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let updated = service.update(user.id, expense.id, &patch)?;
            println!("Updated expense {}", updated.id);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.find(user.id, &id)?;
            let deleted = service.delete(user.id, expense.id)?;
            println!("Deleted expense {} ({})", deleted.id, deleted.description);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};

    #[test]
    fn test_filter_args_to_filter() {
        let args = FilterArgs {
            category: Some("food".into()),
            min: Some("10".into()),
            search: Some("  ".into()),
            ..Default::default()
        };
        let filter = args.to_filter().unwrap();
        assert_eq!(filter.category, Some(ExpenseCategory::Food));
        assert_eq!(filter.min_amount, Some(Money::from_units(10)));
        assert_eq!(filter.search, None);

        assert!(FilterArgs::default().to_filter().unwrap().is_empty());
    }

    #[test]
    fn test_filter_args_reject_bad_input() {
        let args = FilterArgs {
            month: Some("2025-6".into()),
            ..Default::default()
        };
        assert!(args.to_filter().unwrap_err().is_invalid_argument());
    }
}
