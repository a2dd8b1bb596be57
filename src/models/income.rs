//! Income model
//!
//! A single inflow owned by one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{IncomeId, UserId};
use super::money::Money;
use super::month::Month;

/// Validation errors for incomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NonPositiveAmount,
    MissingSource,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Income amount must be greater than zero"),
            Self::MissingSource => write!(f, "Income source is required"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub owner: UserId,
    pub amount: Money,
    /// Where the money came from (employer, client, ...)
    pub source: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(owner: UserId, amount: Money, source: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            owner,
            amount,
            source: source.into(),
            date,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        if self.source.trim().is_empty() {
            return Err(IncomeValidationError::MissingSource);
        }
        Ok(())
    }
}

/// Partial update for an income
#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub amount: Option<Money>,
    pub source: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
}

impl IncomePatch {
    pub fn apply_to(&self, income: &mut Income) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(amount) = self.amount {
            if amount != income.amount {
                changes.push(format!("amount: {} -> {}", income.amount, amount));
                income.amount = amount;
            }
        }
        if let Some(source) = &self.source {
            if *source != income.source {
                changes.push(format!("source: '{}' -> '{}'", income.source, source));
                income.source = source.clone();
            }
        }
        if let Some(date) = self.date {
            if date != income.date {
                changes.push(format!("date: {} -> {}", income.date, date));
                income.date = date;
            }
        }
        if let Some(description) = &self.description {
            if *description != income.description {
                changes.push("description changed".to_string());
                income.description = description.clone();
            }
        }
        if !changes.is_empty() {
            income.updated_at = Utc::now();
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary() -> Income {
        Income::new(
            UserId::new(),
            Money::from_units(3000),
            "Acme Corp",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_validation() {
        let mut income = salary();
        assert!(income.validate().is_ok());

        income.amount = Money::from_cents(-1);
        assert_eq!(
            income.validate(),
            Err(IncomeValidationError::NonPositiveAmount)
        );

        income.amount = Money::from_units(1);
        income.source = String::new();
        assert_eq!(income.validate(), Err(IncomeValidationError::MissingSource));
    }

    #[test]
    fn test_patch() {
        let mut income = salary();
        let patch = IncomePatch {
            source: Some("Globex".into()),
            description: Some(Some("June payroll".into())),
            ..Default::default()
        };
        let changes = patch.apply_to(&mut income);
        assert_eq!(changes.len(), 2);
        assert_eq!(income.source, "Globex");
        assert_eq!(income.amount, Money::from_units(3000));
        assert_eq!(income.month().to_string(), "2025-06");
    }
}
