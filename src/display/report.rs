//! Report formatting for terminal output
//!
//! Monthly summaries, KPIs, category and month breakdowns, savings history,
//! plus the small text helpers the other display modules share.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::ledger::{ExpenseKpis, MonthlySummary};
use crate::models::{ExpenseCategory, Money, Month, SavingsSnapshot};

const BAR_WIDTH: usize = 20;

/// Format a money amount with the configured currency symbol
pub fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

pub fn format_monthly_summary(summary: &MonthlySummary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Summary for {}\n", summary.month));
    output.push_str(&separator(32));
    output.push('\n');
    output.push_str(&format!(
        "Income:        {:>16}\n",
        money(summary.total_income, settings)
    ));
    output.push_str(&format!(
        "Expenses:      {:>16}\n",
        money(summary.total_expenses, settings)
    ));
    output.push_str(&format!(
        "Net balance:   {:>16}\n",
        money(summary.net_balance, settings)
    ));
    output.push_str(&format!(
        "Savings rate:  {:>16}\n",
        format_percentage(summary.savings_rate)
    ));

    output
}

pub fn format_kpis(kpis: Option<&ExpenseKpis>, settings: &Settings) -> String {
    let Some(kpis) = kpis else {
        return "No expenses found.\n".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!("Total spent:        {}\n", money(kpis.total, settings)));
    output.push_str(&format!("Expenses:           {}\n", kpis.count));
    output.push_str(&format!(
        "Average / expense:  {}\n",
        money(kpis.average_per_expense, settings)
    ));
    output.push_str(&format!(
        "Average / month:    {}\n",
        money(kpis.average_per_month, settings)
    ));
    if let Some((category, amount)) = kpis.top_category {
        output.push_str(&format!(
            "Top category:       {} ({})\n",
            category,
            money(amount, settings)
        ));
    }
    output
}

/// Category totals, largest first, with a share bar
pub fn format_category_totals(
    totals: &BTreeMap<ExpenseCategory, Money>,
    settings: &Settings,
) -> String {
    if totals.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let grand_total: Money = totals.values().copied().sum();
    let mut rows: Vec<_> = totals.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut output = String::new();
    for (category, amount) in rows {
        let share = if grand_total.is_positive() {
            amount.cents() as f64 * 100.0 / grand_total.cents() as f64
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<14} {:>12}  {} {}\n",
            category.name(),
            money(*amount, settings),
            format_bar(share, 100.0, BAR_WIDTH),
            format_percentage(share)
        ));
    }
    output.push_str(&separator(14 + 1 + 12));
    output.push('\n');
    output.push_str(&format!(
        "{:<14} {:>12}\n",
        "Total",
        money(grand_total, settings)
    ));
    output
}

/// Spending per month, oldest first, scaled against the largest month
pub fn format_month_totals(totals: &[(Month, Money)], settings: &Settings) -> String {
    if totals.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let peak = totals
        .iter()
        .map(|(_, amount)| amount.cents())
        .max()
        .unwrap_or(0) as f64;

    totals
        .iter()
        .map(|(month, amount)| {
            format!(
                "{}  {:>12}  {}\n",
                month,
                money(*amount, settings),
                format_bar(amount.cents() as f64, peak, BAR_WIDTH)
            )
        })
        .collect()
}

pub fn format_savings_history(history: &[SavingsSnapshot], settings: &Settings) -> String {
    if history.is_empty() {
        return "No savings recorded yet.\n".to_string();
    }

    let mut output = String::new();
    let mut cumulative = Money::zero();
    output.push_str(&format!("{:<8}  {:>12}  {:>12}\n", "Month", "Saved", "Cumulative"));
    output.push_str(&separator(36));
    output.push('\n');
    for snapshot in history {
        cumulative += snapshot.amount;
        output.push_str(&format!(
            "{:<8}  {:>12}  {:>12}\n",
            snapshot.month.to_string(),
            money(snapshot.amount, settings),
            money(cumulative, settings)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(-25.0), "-25%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(500.0, 100.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_money_uses_settings_symbol() {
        let settings = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        assert_eq!(money(Money::from_cents(-1050), &settings), "-€10.50");
    }

    #[test]
    fn test_category_totals_sorted_by_amount() {
        let mut totals = BTreeMap::new();
        totals.insert(ExpenseCategory::Food, Money::from_units(20));
        totals.insert(ExpenseCategory::Utilities, Money::from_units(80));

        let text = format_category_totals(&totals, &Settings::default());
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("Utilities"));
        assert!(lines[0].ends_with("80%"));
        assert!(lines[1].starts_with("Food"));
        assert!(lines[3].contains("$100.00"));
    }

    #[test]
    fn test_savings_history_cumulative() {
        let owner = UserId::new();
        let history = vec![
            SavingsSnapshot::new(owner, Month::parse("2025-05").unwrap(), Money::from_units(300)),
            SavingsSnapshot::new(owner, Month::parse("2025-06").unwrap(), Money::from_units(-100)),
        ];
        let text = format_savings_history(&history, &Settings::default());
        assert!(text.lines().last().unwrap().ends_with("$200.00"));
    }
}
