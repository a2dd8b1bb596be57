//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendbookError;
use crate::models::{BudgetId, Expense, ExpenseId, Month, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{pick_unique, read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

/// Newest first; ties broken by creation time, newest first
fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by_key(|e| (Reverse(e.date), Reverse(e.created_at)));
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), SpendbookError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), SpendbookError> {
        let data = read_lock(&self.data)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by_key(|e| (e.date, e.created_at));

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by id, only if `owner` owns it
    pub fn get(&self, owner: UserId, id: ExpenseId) -> Result<Option<Expense>, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.get(&id).filter(|e| e.owner == owner).cloned())
    }

    /// Find one of `owner`'s expenses by full or abbreviated id
    pub fn find(&self, owner: UserId, identifier: &str) -> Result<Option<Expense>, SpendbookError> {
        let data = read_lock(&self.data)?;
        pick_unique(
            data.values()
                .filter(|e| e.owner == owner && e.id.matches_identifier(identifier)),
            "Expense",
            identifier,
        )
    }

    /// All of `owner`'s expenses, newest first
    pub fn list(&self, owner: UserId) -> Result<Vec<Expense>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut expenses: Vec<_> = data.values().filter(|e| e.owner == owner).cloned().collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// `owner`'s expenses dated inside `month`, newest first
    pub fn list_in_month(
        &self,
        owner: UserId,
        month: Month,
    ) -> Result<Vec<Expense>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut expenses: Vec<_> = data
            .values()
            .filter(|e| e.owner == owner && month.contains(e.date))
            .cloned()
            .collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// `owner`'s expenses that reference `budget_id`
    pub fn list_linked_to(
        &self,
        owner: UserId,
        budget_id: BudgetId,
    ) -> Result<Vec<Expense>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut expenses: Vec<_> = data
            .values()
            .filter(|e| e.owner == owner && e.budget_id == Some(budget_id))
            .cloned()
            .collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SpendbookError> {
        let mut data = write_lock(&self.data)?;
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense owned by `owner`, returning it
    pub fn delete(&self, owner: UserId, id: ExpenseId) -> Result<Option<Expense>, SpendbookError> {
        let mut data = write_lock(&self.data)?;
        if data.get(&id).is_some_and(|e| e.owner == owner) {
            Ok(data.remove(&id))
        } else {
            Ok(None)
        }
    }

    pub fn count(&self, owner: UserId) -> Result<usize, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.values().filter(|e| e.owner == owner).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn expense(owner: UserId, day: u32) -> Expense {
        Expense::new(
            owner,
            Money::from_units(10),
            ExpenseCategory::Food,
            format!("day {}", day),
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        )
    }

    #[test]
    fn test_owner_scoping() {
        let (_temp, repo) = create_test_repo();
        let ana = UserId::new();
        let ben = UserId::new();
        let mine = expense(ana, 1);
        repo.upsert(mine.clone()).unwrap();
        repo.upsert(expense(ben, 2)).unwrap();

        assert_eq!(repo.get(ana, mine.id).unwrap(), Some(mine.clone()));
        assert_eq!(repo.get(ben, mine.id).unwrap(), None);
        assert_eq!(repo.list(ana).unwrap().len(), 1);
        assert!(repo.delete(ben, mine.id).unwrap().is_none());
        assert_eq!(repo.count(ana).unwrap(), 1);
    }

    #[test]
    fn test_list_is_newest_first() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        for day in [3, 20, 7] {
            repo.upsert(expense(owner, day)).unwrap();
        }

        let days: Vec<_> = repo.list(owner).unwrap().iter().map(|e| e.date).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp, repo) = create_test_repo();
        let owner = UserId::new();
        let e = expense(owner, 1);
        repo.upsert(e.clone()).unwrap();

        assert_eq!(repo.find(owner, &e.id.to_string()).unwrap(), Some(e.clone()));
        assert_eq!(repo.find(UserId::new(), &e.id.to_string()).unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        let owner = UserId::new();
        let e = expense(owner, 5);
        repo.upsert(e.clone()).unwrap();
        repo.save().unwrap();

        let reopened = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.get(owner, e.id).unwrap(), Some(e));
    }
}
