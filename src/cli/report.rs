//! Report CLI commands
//!
//! Read-only views over the ledger, except `summary`, which records the month's
//! savings snapshot the first time it runs.

use clap::Subcommand;

use super::expense::FilterArgs;
use super::month_or_current;
use crate::config::Settings;
use crate::display;
use crate::error::SpendbookResult;
use crate::models::User;
use crate::services::SummaryService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total, count, averages and top category
    Kpis {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Spending per category
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Spending per month
    Months,

    /// Income, expenses, net balance and savings rate for a month
    Summary {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Do not record the month's savings snapshot
        #[arg(long)]
        no_snapshot: bool,
    },

    /// Recorded monthly savings
    Savings,
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ReportCommands,
) -> SpendbookResult<()> {
    let service = SummaryService::new(storage);

    match cmd {
        ReportCommands::Kpis { filter } => {
            let kpis = service.kpis(user.id, &filter.to_filter()?)?;
            print!("{}", display::format_kpis(kpis.as_ref(), settings));
        }

        ReportCommands::Categories { filter } => {
            let totals = service.category_totals(user.id, &filter.to_filter()?)?;
            print!("{}", display::format_category_totals(&totals, settings));
        }

        ReportCommands::Months => {
            let totals = service.month_totals(user.id)?;
            print!("{}", display::format_month_totals(&totals, settings));
        }

        ReportCommands::Summary { month, no_snapshot } => {
            let month = month_or_current(month.as_deref())?;
            let summary = service.monthly_summary(user.id, month)?;
            print!("{}", display::format_monthly_summary(&summary, settings));

            if !no_snapshot {
                if let Some(snapshot) = service.record_snapshot(user.id, &summary)? {
                    println!(
                        "Recorded savings of {} for {}",
                        display::money(snapshot.amount, settings),
                        snapshot.month
                    );
                }
            }
        }

        ReportCommands::Savings => {
            let history = service.savings_history(user.id)?;
            print!("{}", display::format_savings_history(&history, settings));
        }
    }

    Ok(())
}
