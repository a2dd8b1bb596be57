//! Core data models for Spendbook
//!
//! Record kinds (users, expenses, incomes, monthly budgets, savings snapshots)
//! and the value types they are built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod month;
pub mod savings;
pub mod user;

pub use budget::{BudgetPatch, MonthlyBudget};
pub use category::ExpenseCategory;
pub use expense::{Expense, ExpensePatch};
pub use ids::{BudgetId, ExpenseId, IncomeId, SavingsId, UserId};
pub use income::{Income, IncomePatch};
pub use money::Money;
pub use month::Month;
pub use savings::SavingsSnapshot;
pub use user::User;
