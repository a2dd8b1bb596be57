//! Expense service
//!
//! Owner-scoped expense CRUD. A budget link is checked whenever it is set or
//! the expense's date moves: the budget must belong to the same owner and cover
//! the month of the expense's date.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{SpendbookError, SpendbookResult};
use crate::ledger::ExpenseFilter;
use crate::models::{
    BudgetId, Expense, ExpenseCategory, ExpenseId, ExpensePatch, Money, MonthlyBudget, UserId,
};
use crate::storage::Storage;

use super::clean_optional;

/// Fields for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub budget_id: Option<BudgetId>,
}

impl NewExpense {
    pub fn new(
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            date,
            notes: None,
            budget_id: None,
        }
    }
}

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, owner: UserId, input: NewExpense) -> SpendbookResult<Expense> {
        let mut expense = Expense::new(
            owner,
            input.amount,
            input.category,
            input.description.trim(),
            input.date,
        );
        expense.notes = clean_optional(input.notes);
        expense.budget_id = input.budget_id;

        expense
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;
        if let Some(budget_id) = expense.budget_id {
            self.check_budget_link(owner, budget_id, expense.date)?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            owner,
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn update(
        &self,
        owner: UserId,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> SpendbookResult<Expense> {
        let before = self
            .storage
            .expenses
            .get(owner, id)?
            .ok_or_else(|| SpendbookError::expense_not_found(id.to_string()))?;

        let mut patch = patch.clone();
        patch.description = patch.description.map(|d| d.trim().to_string());
        patch.notes = patch.notes.map(clean_optional);

        let mut expense = before.clone();
        let changes = patch.apply_to(&mut expense);
        if changes.is_empty() {
            return Ok(before);
        }

        expense
            .validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        let link_touched = expense.budget_id != before.budget_id || expense.date != before.date;
        if link_touched {
            if let Some(budget_id) = expense.budget_id {
                self.check_budget_link(owner, budget_id, expense.date)?;
            }
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            owner,
            Some(expense.description.clone()),
            &before,
            &expense,
            Some(changes.join(", ")),
        )?;

        Ok(expense)
    }

    pub fn delete(&self, owner: UserId, id: ExpenseId) -> SpendbookResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(owner, id)?
            .ok_or_else(|| SpendbookError::expense_not_found(id.to_string()))?;

        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            owner,
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Matching expenses, newest first
    pub fn list(&self, owner: UserId, filter: &ExpenseFilter) -> SpendbookResult<Vec<Expense>> {
        let expenses = self.storage.expenses.list(owner)?;
        Ok(filter.apply(&expenses))
    }

    /// Find an expense by full or short id; NotFound when nothing matches
    pub fn find(&self, owner: UserId, identifier: &str) -> SpendbookResult<Expense> {
        self.storage
            .expenses
            .find(owner, identifier)?
            .ok_or_else(|| SpendbookError::expense_not_found(identifier))
    }

    /// The budget an expense links to; a dangling link reads as no budget
    pub fn linked_budget(&self, expense: &Expense) -> SpendbookResult<Option<MonthlyBudget>> {
        match expense.budget_id {
            Some(id) => self.storage.budgets.get(expense.owner, id),
            None => Ok(None),
        }
    }

    fn check_budget_link(
        &self,
        owner: UserId,
        budget_id: BudgetId,
        date: NaiveDate,
    ) -> SpendbookResult<()> {
        let budget = self.storage.budgets.get(owner, budget_id)?.ok_or_else(|| {
            SpendbookError::InvalidArgument(format!("Budget {} does not exist", budget_id))
        })?;

        if !budget.month.contains(date) {
            return Err(SpendbookError::InvalidArgument(format!(
                "Budget '{}' covers {}, but the expense is dated {}",
                budget.name, budget.month, date
            )));
        }
        Ok(())
    }
}
