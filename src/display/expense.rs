//! Expense and income display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::{money, truncate};
use crate::config::Settings;
use crate::models::{Expense, Income, Money, MonthlyBudget};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Expenses as a table with a total line underneath
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format(&settings.date_format).to_string(),
        category: e.category.name(),
        description: truncate(&e.description, 32),
        amount: money(e.amount, settings),
    });

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(4), Alignment::right());

    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        money(total, settings)
    )
}

pub fn format_expense_details(
    expense: &Expense,
    budget: Option<&MonthlyBudget>,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!("Amount:      {}\n", money(expense.amount, settings)));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Description: {}\n", expense.description));

    if let Some(notes) = &expense.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    // a link whose budget is gone reads as no budget
    match budget {
        Some(budget) => output.push_str(&format!("Budget:      {} ({})\n", budget.name, budget.month)),
        None => output.push_str("Budget:      (none)\n"),
    }

    output
}

pub fn format_income_list(incomes: &[Income], settings: &Settings) -> String {
    if incomes.is_empty() {
        return "No incomes found.\n".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.to_string(),
        date: i.date.format(&settings.date_format).to_string(),
        source: truncate(&i.source, 32),
        amount: money(i.amount, settings),
    });

    let total: Money = incomes.iter().map(|i| i.amount).sum();
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());

    format!(
        "{}\n{} income(s), total {}\n",
        table,
        incomes.len(),
        money(total, settings)
    )
}
