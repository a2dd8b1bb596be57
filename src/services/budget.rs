//! Budget service
//!
//! Creating, editing and deleting monthly budgets, and reading their usage.
//! Usage always comes from the expenses dated in the budget's month; an
//! expense's budget link plays no part in it.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{SpendbookError, SpendbookResult};
use crate::ledger::{compute_usage, daily_allowance, BudgetUsage};
use crate::models::{BudgetId, BudgetPatch, Money, Month, MonthlyBudget, UserId};
use crate::storage::Storage;

/// Service for monthly budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A budget with its usage figures
#[derive(Debug, Clone)]
pub struct BudgetSummary {
    pub budget: MonthlyBudget,
    pub usage: BudgetUsage,
    /// What can still be spent per day for the rest of the month
    pub daily_allowance: Option<Money>,
    /// Expenses explicitly linked to this budget
    pub linked_expenses: usize,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget.
    ///
    /// InvalidArgument for a blank name or a cap that is not positive; Conflict
    /// when `(owner, name, month)` already exists.
    pub fn create(
        &self,
        owner: UserId,
        name: &str,
        max_amount: Money,
        month: Month,
    ) -> SpendbookResult<MonthlyBudget> {
        let budget = MonthlyBudget::new(owner, name.trim(), max_amount, month);

        budget
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::MonthlyBudget,
            budget.id.to_string(),
            owner,
            Some(budget.name.clone()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Apply a partial update.
    ///
    /// Only supplied fields change. Moving or renaming a budget leaves expenses
    /// that link to it as they are.
    pub fn update(
        &self,
        owner: UserId,
        id: BudgetId,
        patch: &BudgetPatch,
    ) -> SpendbookResult<MonthlyBudget> {
        let before = self
            .storage
            .budgets
            .get(owner, id)?
            .ok_or_else(|| SpendbookError::budget_not_found(id.to_string()))?;

        let mut budget = before.clone();
        let changes = patch.apply_to(&mut budget);
        if changes.is_empty() {
            return Ok(before);
        }

        budget
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::MonthlyBudget,
            budget.id.to_string(),
            owner,
            Some(budget.name.clone()),
            &before,
            &budget,
            Some(changes.join(", ")),
        )?;

        Ok(budget)
    }

    /// Delete a budget. Linked expenses are kept; their link now dangles.
    pub fn delete(&self, owner: UserId, id: BudgetId) -> SpendbookResult<MonthlyBudget> {
        let budget = self
            .storage
            .budgets
            .delete(owner, id)?
            .ok_or_else(|| SpendbookError::budget_not_found(id.to_string()))?;

        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::MonthlyBudget,
            budget.id.to_string(),
            owner,
            Some(budget.name.clone()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Budgets by month descending, then name ascending
    pub fn list(&self, owner: UserId, month: Option<Month>) -> SpendbookResult<Vec<MonthlyBudget>> {
        self.storage.budgets.list(owner, month)
    }

    pub fn get(&self, owner: UserId, id: BudgetId) -> SpendbookResult<Option<MonthlyBudget>> {
        self.storage.budgets.get(owner, id)
    }

    /// Find a budget by id or name; NotFound when nothing matches
    pub fn find(
        &self,
        owner: UserId,
        identifier: &str,
        month: Option<Month>,
    ) -> SpendbookResult<MonthlyBudget> {
        self.storage
            .budgets
            .find(owner, identifier, month)?
            .ok_or_else(|| SpendbookError::budget_not_found(identifier))
    }

    /// Usage of one budget from the owner's expenses in its month
    pub fn usage(&self, budget: &MonthlyBudget) -> SpendbookResult<BudgetUsage> {
        let expenses = self
            .storage
            .expenses
            .list_in_month(budget.owner, budget.month)?;
        Ok(compute_usage(budget, &expenses))
    }

    /// Usage, daily allowance and link count for one budget
    pub fn summary(&self, budget: &MonthlyBudget, today: NaiveDate) -> SpendbookResult<BudgetSummary> {
        let usage = self.usage(budget)?;
        let linked_expenses = self
            .storage
            .expenses
            .list_linked_to(budget.owner, budget.id)?
            .len();

        Ok(BudgetSummary {
            budget: budget.clone(),
            daily_allowance: daily_allowance(&usage, budget.month, today),
            usage,
            linked_expenses,
        })
    }

    /// Summaries for every budget the owner has (optionally in one month)
    pub fn summaries(
        &self,
        owner: UserId,
        month: Option<Month>,
        today: NaiveDate,
    ) -> SpendbookResult<Vec<BudgetSummary>> {
        self.list(owner, month)?
            .iter()
            .map(|budget| self.summary(budget, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::SpendbookPaths;
    use crate::ledger::BudgetStatus;
    use crate::models::{Expense, ExpenseCategory};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn june() -> Month {
        Month::parse("2025-06").unwrap()
    }

    fn add_expense(storage: &Storage, owner: UserId, units: i64, date: &str) {
        let expense = Expense::new(
            owner,
            Money::from_units(units),
            ExpenseCategory::Food,
            "shop",
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        );
        storage.expenses.upsert(expense).unwrap();
    }

    #[test]
    fn test_create_budget() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        let budget = service
            .create(owner, " Groceries ", Money::from_units(500), june())
            .unwrap();
        assert_eq!(budget.name, "Groceries");

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].owner_id, owner);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        assert!(service
            .create(owner, "Groceries", Money::zero(), june())
            .unwrap_err()
            .is_invalid_argument());
        assert!(service
            .create(owner, "  ", Money::from_units(5), june())
            .unwrap_err()
            .is_invalid_argument());
        assert!(service.list(owner, None).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_budget_conflicts() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();

        service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();
        let err = service
            .create(owner, "Groceries", Money::from_units(300), june())
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(service.list(owner, None).unwrap().len(), 1);
    }

    #[test]
    fn test_update_only_changes_supplied_fields() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();
        let budget = service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();

        let patch = BudgetPatch {
            max_amount: Some(Money::from_units(650)),
            ..Default::default()
        };
        let updated = service.update(owner, budget.id, &patch).unwrap();

        assert_eq!(updated.max_amount, Money::from_units(650));
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.month, june());

        let last = storage.audit().read_all().unwrap().pop().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert_eq!(
            last.diff_summary.as_deref(),
            Some("maxAmount: $500.00 -> $650.00")
        );
    }

    #[test]
    fn test_update_other_owner_is_not_found() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();
        let budget = service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();

        let patch = BudgetPatch {
            name: Some("Mine now".into()),
            ..Default::default()
        };
        let err = service.update(UserId::new(), budget.id, &patch).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.get(owner, budget.id).unwrap().unwrap().name, "Groceries");
    }

    #[test]
    fn test_update_into_existing_slot_conflicts() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();
        service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();
        let july = service
            .create(owner, "Groceries", Money::from_units(500), june().next())
            .unwrap();

        let patch = BudgetPatch {
            month: Some(june()),
            ..Default::default()
        };
        assert!(service.update(owner, july.id, &patch).unwrap_err().is_conflict());
    }

    #[test]
    fn test_delete_keeps_linked_expenses() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();
        let budget = service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();

        let mut expense = Expense::new(
            owner,
            Money::from_units(20),
            ExpenseCategory::Food,
            "shop",
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        );
        expense.budget_id = Some(budget.id);
        storage.expenses.upsert(expense.clone()).unwrap();

        service.delete(owner, budget.id).unwrap();

        let kept = storage.expenses.get(owner, expense.id).unwrap().unwrap();
        assert_eq!(kept.budget_id, Some(budget.id));
        assert!(service.delete(owner, budget.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_usage_from_expense_dates() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = UserId::new();
        let budget = service
            .create(owner, "Groceries", Money::from_units(500), june())
            .unwrap();

        add_expense(&storage, owner, 120, "2025-06-03");
        add_expense(&storage, owner, 200, "2025-06-20");
        add_expense(&storage, owner, 50, "2025-07-01");
        add_expense(&storage, UserId::new(), 999, "2025-06-10");

        let summary = service
            .summary(&budget, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap())
            .unwrap();
        assert_eq!(summary.usage.spent, Money::from_units(320));
        assert_eq!(summary.usage.remaining_amount, Money::from_units(180));
        assert_eq!(summary.usage.used_percentage, 64.0);
        assert_eq!(summary.usage.status(), BudgetStatus::OnTrack);
        assert_eq!(summary.daily_allowance, Some(Money::from_units(18)));
        assert_eq!(summary.linked_expenses, 0);
    }
}
