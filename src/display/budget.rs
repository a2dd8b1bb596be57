//! Budget display formatting
//!
//! Budgets are shown with their usage: spent, remaining, a progress bar and
//! the status band.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, money};
use crate::config::Settings;
use crate::services::BudgetSummary;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cap")]
    cap: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

pub fn format_budget_list(summaries: &[BudgetSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = summaries.iter().map(|s| BudgetRow {
        id: s.budget.id.to_string(),
        month: s.budget.month.to_string(),
        name: s.budget.name.clone(),
        cap: money(s.budget.max_amount, settings),
        spent: money(s.usage.spent, settings),
        remaining: money(s.usage.remaining_amount, settings),
        used: format_percentage(s.usage.used_percentage),
        status: s.usage.status().label(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(3..7), Alignment::right());
    format!("{}\n", table)
}

pub fn format_budget_details(summary: &BudgetSummary, settings: &Settings) -> String {
    let budget = &summary.budget;
    let usage = &summary.usage;
    let mut output = String::new();

    output.push_str(&format!("Budget:      {} ({})\n", budget.name, budget.id));
    output.push_str(&format!("Month:       {}\n", budget.month));
    output.push_str(&format!("Cap:         {}\n", money(budget.max_amount, settings)));
    output.push_str(&format!("Spent:       {}\n", money(usage.spent, settings)));
    output.push_str(&format!(
        "Remaining:   {}\n",
        money(usage.remaining_amount, settings)
    ));
    output.push_str(&format!(
        "Used:        {} {}\n",
        format_bar(usage.progress_percentage(), 100.0, 20),
        format_percentage(usage.used_percentage)
    ));
    output.push_str(&format!("Status:      {}\n", usage.status()));

    if usage.is_overspent() {
        output.push_str(&format!(
            "Overspent by {}\n",
            money(-usage.remaining_amount, settings)
        ));
    } else if let Some(per_day) = summary.daily_allowance {
        output.push_str(&format!("Per day:     {}\n", money(per_day, settings)));
    }

    output.push_str(&format!("Linked:      {} expense(s)\n", summary.linked_expenses));
    output
}
