//! Monthly budget repository for JSON storage
//!
//! Enforces the `(owner, name, month)` uniqueness constraint on every write, for
//! inserts and updates alike.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendbookError;
use crate::models::{BudgetId, Month, MonthlyBudget, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{pick_unique, read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<MonthlyBudget>,
}

/// Repository for monthly budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, MonthlyBudget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendbookError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendbookError> {
        let data = read_lock(&self.data)?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.month.cmp(&b.month).then_with(|| a.name.cmp(&b.name)));

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(
        &self,
        owner: UserId,
        id: BudgetId,
    ) -> Result<Option<MonthlyBudget>, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.get(&id).filter(|b| b.owner == owner).cloned())
    }

    /// Find one of `owner`'s budgets by id, or failing that by name, optionally
    /// within one month. An exact name wins over case-insensitive matches.
    pub fn find(
        &self,
        owner: UserId,
        identifier: &str,
        month: Option<Month>,
    ) -> Result<Option<MonthlyBudget>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mine: Vec<&MonthlyBudget> = data
            .values()
            .filter(|b| b.owner == owner && month.map_or(true, |m| b.month == m))
            .collect();

        if let Some(budget) = pick_unique(
            mine.iter()
                .copied()
                .filter(|b| b.id.matches_identifier(identifier)),
            "Budget",
            identifier,
        )? {
            return Ok(Some(budget));
        }

        let name = identifier.trim();
        if let Some(budget) = pick_unique(
            mine.iter().copied().filter(|b| b.name == name),
            "Budget",
            identifier,
        )? {
            return Ok(Some(budget));
        }

        pick_unique(
            mine.iter().copied().filter(|b| b.name_matches(name)),
            "Budget",
            identifier,
        )
    }

    /// `owner`'s budgets by month descending, then name ascending
    pub fn list(
        &self,
        owner: UserId,
        month: Option<Month>,
    ) -> Result<Vec<MonthlyBudget>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut budgets: Vec<_> = data
            .values()
            .filter(|b| b.owner == owner && month.map_or(true, |m| b.month == m))
            .cloned()
            .collect();
        budgets.sort_by(|a, b| {
            Reverse(a.month)
                .cmp(&Reverse(b.month))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(budgets)
    }

    /// Insert or replace a budget.
    ///
    /// Conflict when a *different* budget of the same owner already holds the
    /// `(name, month)` slot; the store is left untouched in that case.
    pub fn upsert(&self, budget: MonthlyBudget) -> Result<(), SpendbookError> {
        let mut data = write_lock(&self.data)?;

        let taken = data.values().any(|other| {
            other.id != budget.id && other.same_slot(budget.owner, &budget.name, budget.month)
        });
        if taken {
            return Err(SpendbookError::budget_conflict(&budget.name, budget.month));
        }

        data.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(
        &self,
        owner: UserId,
        id: BudgetId,
    ) -> Result<Option<MonthlyBudget>, SpendbookError> {
        let mut data = write_lock(&self.data)?;
        if data.get(&id).is_some_and(|b| b.owner == owner) {
            Ok(data.remove(&id))
        } else {
            Ok(None)
        }
    }
}
