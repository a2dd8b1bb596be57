//! Reports and savings snapshots
//!
//! Storage-backed wrappers around the ledger's aggregation views, plus the
//! once-per-month savings snapshot.

use std::collections::BTreeMap;

use crate::audit::EntityType;
use crate::error::SpendbookResult;
use crate::ledger::{self, ExpenseFilter, ExpenseKpis, MonthlySummary};
use crate::models::{ExpenseCategory, Money, Month, SavingsSnapshot, UserId};
use crate::storage::Storage;

pub struct SummaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Income, spending, net balance and savings rate for one month
    pub fn monthly_summary(&self, owner: UserId, month: Month) -> SpendbookResult<MonthlySummary> {
        let incomes = self.storage.incomes.list(owner, Some(month))?;
        let expenses = self.storage.expenses.list_in_month(owner, month)?;
        Ok(ledger::monthly_summary(month, &incomes, &expenses))
    }

    /// Record the month's net balance unless a snapshot already exists.
    ///
    /// Returns the new snapshot, or `None` when the month was already recorded.
    pub fn record_snapshot(
        &self,
        owner: UserId,
        summary: &MonthlySummary,
    ) -> SpendbookResult<Option<SavingsSnapshot>> {
        let snapshot = SavingsSnapshot::new(owner, summary.month, summary.net_balance);
        if !self.storage.savings.insert_if_absent(snapshot.clone())? {
            return Ok(None);
        }

        self.storage.savings.save()?;
        self.storage.log_create(
            EntityType::SavingsSnapshot,
            snapshot.id.to_string(),
            owner,
            Some(format!("Savings {}", snapshot.month)),
            &snapshot,
        )?;

        Ok(Some(snapshot))
    }

    /// Recorded snapshots, oldest month first
    pub fn savings_history(&self, owner: UserId) -> SpendbookResult<Vec<SavingsSnapshot>> {
        self.storage.savings.list(owner)
    }

    /// KPIs over the expenses matching `filter`; `None` when there are none
    pub fn kpis(&self, owner: UserId, filter: &ExpenseFilter) -> SpendbookResult<Option<ExpenseKpis>> {
        let expenses = filter.apply(&self.storage.expenses.list(owner)?);
        Ok(ledger::kpis(&expenses))
    }

    pub fn category_totals(
        &self,
        owner: UserId,
        filter: &ExpenseFilter,
    ) -> SpendbookResult<BTreeMap<ExpenseCategory, Money>> {
        let expenses = filter.apply(&self.storage.expenses.list(owner)?);
        Ok(ledger::total_by_category(&expenses))
    }

    /// Spending per month, oldest first
    pub fn month_totals(&self, owner: UserId) -> SpendbookResult<Vec<(Month, Money)>> {
        let expenses = self.storage.expenses.list(owner)?;
        Ok(ledger::total_by_month(&expenses))
    }
}
