//! Storage layer for Spendbook
//!
//! One JSON file per record kind, each loaded into an in-memory map and written
//! back atomically. Every query takes the owner, so one user's records are
//! never visible to another.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod incomes;
pub mod savings;
pub mod users;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use incomes::IncomeRepository;
pub use savings::SavingsRepository;
pub use users::UserRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendbookPaths;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::UserId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendbookPaths,
    pub users: UserRepository,
    pub expenses: ExpenseRepository,
    pub incomes: IncomeRepository,
    pub budgets: BudgetRepository,
    pub savings: SavingsRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage instance rooted at `paths`; nothing is loaded yet
    pub fn new(paths: SpendbookPaths) -> Result<Self, SpendbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            incomes: IncomeRepository::new(paths.incomes_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            savings: SavingsRepository::new(paths.savings_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendbookPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), SpendbookError> {
        self.users.load()?;
        self.expenses.load()?;
        self.incomes.load()?;
        self.budgets.load()?;
        self.savings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendbookError> {
        self.users.save()?;
        self.expenses.save()?;
        self.incomes.save()?;
        self.budgets.save()?;
        self.savings.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: UserId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendbookResult<()> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            owner,
            entity_name,
            entity,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: UserId,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendbookResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            owner,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: UserId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendbookResult<()> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            owner,
            entity_name,
            entity,
        ))
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> SpendbookResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| SpendbookError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> SpendbookResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| SpendbookError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Pick the single record matching a user-typed identifier.
///
/// No match is `Ok(None)`; more than one match is an InvalidArgument so a short
/// prefix never silently picks the wrong record.
pub(crate) fn pick_unique<'a, T, I>(
    candidates: I,
    entity_type: &str,
    identifier: &str,
) -> SpendbookResult<Option<T>>
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut found = candidates.into_iter();
    let first = match found.next() {
        Some(first) => first.clone(),
        None => return Ok(None),
    };
    let others = found.count();
    if others > 0 {
        return Err(SpendbookError::InvalidArgument(format!(
            "'{}' matches {} {} records; use a longer id",
            identifier,
            others + 1,
            entity_type.to_lowercase()
        )));
    }
    Ok(Some(first))
}
