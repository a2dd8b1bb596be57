//! Export module for Spendbook
//!
//! - CSV: expenses, spreadsheet-compatible
//! - JSON: everything one user owns, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_expenses_csv;
pub use json::{export_json, ExportMetadata, OwnerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
