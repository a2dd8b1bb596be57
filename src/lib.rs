//! Spendbook - terminal personal finance tracker
//!
//! Records expenses and incomes per user, keeps named monthly spending caps,
//! and derives usage, category/month totals, KPIs and monthly savings from them.
//!
//! # Architecture
//!
//! - `models`: records and value types (money, month, category, ids)
//! - `ledger`: pure budget usage, aggregation and filtering over records
//! - `storage`: owner-scoped JSON repositories
//! - `services`: validation, persistence and audit logging of every mutation
//! - `crypto`: password hashing and sealed bearer tokens
//! - `audit`: append-only audit log
//! - `config`: paths, settings and the CLI login session
//! - `export`: CSV / JSON / YAML export
//! - `display`, `cli`: terminal presentation
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::config::{SpendbookPaths, Settings};
//! use spendbook::storage::Storage;
//!
//! let paths = SpendbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SpendbookError, SpendbookResult};
