//! Income CLI commands

use clap::Subcommand;

use super::date_or_today;
use crate::config::Settings;
use crate::display;
use crate::error::SpendbookResult;
use crate::models::{IncomePatch, User};
use crate::services::{parse_date, parse_month, parse_positive_amount, IncomeService, NewIncome};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record an income
    Add {
        /// Amount (e.g. "2000" or "2000.00")
        amount: String,
        /// Employer, client or other source
        source: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List incomes, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Edit an income
    Edit {
        /// Income ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        source: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// New description; an empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an income
    Delete {
        /// Income ID
        id: String,
    },
}

pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: IncomeCommands,
) -> SpendbookResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            date,
            description,
        } => {
            let income = service.create(
                user.id,
                NewIncome {
                    amount: parse_positive_amount(&amount)?,
                    source,
                    date: date_or_today(date.as_deref())?,
                    description,
                },
            )?;
            println!(
                "Recorded income of {} from {} ({})",
                display::money(income.amount, settings),
                income.source,
                income.id
            );
        }

        IncomeCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let incomes = service.list(user.id, month)?;
            print!("{}", display::format_income_list(&incomes, settings));
        }

        IncomeCommands::Edit {
            id,
            amount,
            source,
            date,
            description,
        } => {
            let income = service.find(user.id, &id)?;
            let patch = IncomePatch {
                amount: amount.as_deref().map(parse_positive_amount).transpose()?,
                source,
                date: date.as_deref().map(parse_date).transpose()?,
                description: description.map(Some),
            };
            let updated = service.update(user.id, income.id, &patch)?;
            println!("Updated income {}", updated.id);
        }

        IncomeCommands::Delete { id } => {
            let income = service.find(user.id, &id)?;
            let deleted = service.delete(user.id, income.id)?;
            println!("Deleted income {} ({})", deleted.id, deleted.source);
        }
    }

    Ok(())
}
