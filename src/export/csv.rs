//! CSV export of expenses
//!
//! Columns: Date, Category, Description, Notes, Amount. Amounts are written as
//! plain decimals without a currency symbol so spreadsheets read them as numbers.

use std::io::Write;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::Expense;

pub const CSV_HEADER: [&str; 5] = ["Date", "Category", "Description", "Notes", "Amount"];

/// Write `expenses` to `writer` in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> SpendbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| SpendbookError::Export(e.to_string());

    csv.write_record(CSV_HEADER).map_err(export_err)?;

    for expense in expenses {
        let date = expense.date.format("%Y-%m-%d").to_string();
        let amount = expense.amount.format_with_symbol("");
        csv.write_record([
            date.as_str(),
            expense.category.name(),
            expense.description.as_str(),
            expense.notes.as_deref().unwrap_or(""),
            amount.as_str(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| SpendbookError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_export_expenses_csv() {
        let mut lunch = Expense::new(
            UserId::new(),
            Money::from_cents(1250),
            ExpenseCategory::Food,
            "Lunch, with \"Ana\"",
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        );
        lunch.notes = Some("team".into());

        let mut output = Vec::new();
        export_expenses_csv(&[lunch], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Date,Category,Description,Notes,Amount");
        assert_eq!(
            lines[1],
            "2025-06-03,Food,\"Lunch, with \"\"Ana\"\"\",team,12.50"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut output = Vec::new();
        export_expenses_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Date,Category,Description,Notes,Amount\n"
        );
    }
}
