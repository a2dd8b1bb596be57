//! Service layer for Spendbook
//!
//! Business rules on top of the storage layer: validation, owner scoping,
//! persistence and audit logging of every mutation.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod income;
pub mod summary;

pub use auth::AuthService;
pub use budget::{BudgetService, BudgetSummary};
pub use expense::{ExpenseService, NewExpense};
pub use income::{IncomeService, NewIncome};
pub use summary::SummaryService;

use chrono::NaiveDate;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{ExpenseCategory, Money, Month};

/// Parse a `YYYY-MM` token typed by the user
pub fn parse_month(input: &str) -> SpendbookResult<Month> {
    Month::parse(input).map_err(|e| SpendbookError::InvalidArgument(e.to_string()))
}

/// Parse an amount that must be strictly positive
pub fn parse_positive_amount(input: &str) -> SpendbookResult<Money> {
    let amount = parse_amount(input)?;
    if !amount.is_positive() {
        return Err(SpendbookError::InvalidArgument(format!(
            "Amount must be greater than zero: '{}'",
            input.trim()
        )));
    }
    Ok(amount)
}

/// Parse any amount (filters accept zero)
pub fn parse_amount(input: &str) -> SpendbookResult<Money> {
    Money::parse(input).map_err(|e| SpendbookError::InvalidArgument(e.to_string()))
}

pub fn parse_category(input: &str) -> SpendbookResult<ExpenseCategory> {
    ExpenseCategory::parse(input).map_err(|e| SpendbookError::InvalidArgument(e.to_string()))
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> SpendbookResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        SpendbookError::InvalidArgument(format!(
            "Invalid date '{}'; expected YYYY-MM-DD",
            input.trim()
        ))
    })
}

/// Trim optional free text; blank becomes `None`
pub(crate) fn clean_optional(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_rejects_malformed() {
        assert_eq!(parse_month("2025-06").unwrap().to_string(), "2025-06");
        for bad in ["2025-6", "2025-13", "June 2025", "2025-06-01"] {
            assert!(parse_month(bad).unwrap_err().is_invalid_argument(), "{}", bad);
        }
    }

    #[test]
    fn test_parse_positive_amount() {
        assert_eq!(
            parse_positive_amount("12.50").unwrap(),
            Money::from_cents(1250)
        );
        assert!(parse_positive_amount("0").unwrap_err().is_invalid_argument());
        assert!(parse_positive_amount("-3").unwrap_err().is_invalid_argument());
        assert!(parse_positive_amount("1.234")
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(parse_amount("0").unwrap(), Money::zero());
        assert!(parse_positive_amount("92233720368547758.07")
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_parse_date_and_category() {
        assert_eq!(
            parse_date("2025-06-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
        );
        assert!(parse_date("03/06/2025").is_err());
        assert_eq!(parse_category("food").unwrap(), ExpenseCategory::Food);
        assert!(parse_category("rent").is_err());
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(Some("  ".into())), None);
        assert_eq!(clean_optional(Some(" hi ".into())), Some("hi".into()));
        assert_eq!(clean_optional(None), None);
    }
}
