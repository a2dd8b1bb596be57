//! Audit logging for Spendbook
//!
//! Every create, update and delete performed by a service is appended to
//! `audit.log` as one JSON line, with before/after snapshots and the owner it
//! belongs to.
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::MonthlyBudget,
//!     budget.id.to_string(),
//!     budget.owner,
//!     Some(budget.name.clone()),
//!     &budget,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
