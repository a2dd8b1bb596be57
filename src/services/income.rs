//! Income service
//!
//! Owner-scoped CRUD for recorded income.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Income, IncomeId, IncomePatch, Money, Month, UserId};
use crate::storage::Storage;

use super::clean_optional;

/// Fields for a new income
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub amount: Money,
    pub source: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, owner: UserId, input: NewIncome) -> SpendbookResult<Income> {
        let mut income = Income::new(owner, input.amount, input.source.trim(), input.date);
        income.description = clean_optional(input.description);

        income
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        self.storage.log_create(
            EntityType::Income,
            income.id.to_string(),
            owner,
            Some(income.source.clone()),
            &income,
        )?;

        Ok(income)
    }

    pub fn update(
        &self,
        owner: UserId,
        id: IncomeId,
        patch: &IncomePatch,
    ) -> SpendbookResult<Income> {
        let before = self
            .storage
            .incomes
            .get(owner, id)?
            .ok_or_else(|| SpendbookError::income_not_found(id.to_string()))?;

        let mut patch = patch.clone();
        patch.source = patch.source.map(|s| s.trim().to_string());
        patch.description = patch.description.map(clean_optional);

        let mut income = before.clone();
        let changes = patch.apply_to(&mut income);
        if changes.is_empty() {
            return Ok(before);
        }

        income
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        self.storage.log_update(
            EntityType::Income,
            income.id.to_string(),
            owner,
            Some(income.source.clone()),
            &before,
            &income,
            Some(changes.join(", ")),
        )?;

        Ok(income)
    }

    pub fn delete(&self, owner: UserId, id: IncomeId) -> SpendbookResult<Income> {
        let income = self
            .storage
            .incomes
            .delete(owner, id)?
            .ok_or_else(|| SpendbookError::income_not_found(id.to_string()))?;

        self.storage.incomes.save()?;

        self.storage.log_delete(
            EntityType::Income,
            income.id.to_string(),
            owner,
            Some(income.source.clone()),
            &income,
        )?;

        Ok(income)
    }

    /// Incomes newest first, optionally restricted to one month
    pub fn list(&self, owner: UserId, month: Option<Month>) -> SpendbookResult<Vec<Income>> {
        self.storage.incomes.list(owner, month)
    }

    pub fn find(&self, owner: UserId, identifier: &str) -> SpendbookResult<Income> {
        self.storage
            .incomes
            .find(owner, identifier)?
            .ok_or_else(|| SpendbookError::income_not_found(identifier))
    }
}
