//! JSON export of everything one user owns

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Expense, Income, MonthlyBudget, SavingsSnapshot, User};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One owner's complete data set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub username: String,
    pub email: String,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub budgets: Vec<MonthlyBudget>,
    pub savings: Vec<SavingsSnapshot>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub income_count: usize,
    pub budget_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl OwnerExport {
    /// Collect `user`'s records; the password hash is never included
    pub fn from_storage(storage: &Storage, user: &User) -> SpendbookResult<Self> {
        let expenses = storage.expenses.list(user.id)?;
        let incomes = storage.incomes.list(user.id, None)?;
        let budgets = storage.budgets.list(user.id, None)?;
        let savings = storage.savings.list(user.id)?;

        // expenses come newest first
        let latest_expense = expenses.first().map(|e| e.date.to_string());
        let earliest_expense = expenses.last().map(|e| e.date.to_string());

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            income_count: incomes.len(),
            budget_count: budgets.len(),
            earliest_expense,
            latest_expense,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            expenses,
            incomes,
            budgets,
            savings,
            metadata,
        })
    }
}

pub fn export_json<W: Write>(storage: &Storage, user: &User, writer: W) -> SpendbookResult<()> {
    let export = OwnerExport::from_storage(storage, user)?;
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| SpendbookError::Export(e.to_string()))
}
