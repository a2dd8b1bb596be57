//! YAML export
//!
//! Same document as the JSON export, prefixed with a comment header.

use std::io::Write;

use crate::error::{SpendbookError, SpendbookResult};
use crate::export::json::OwnerExport;
use crate::models::User;
use crate::storage::Storage;

pub fn export_yaml<W: Write>(storage: &Storage, user: &User, writer: &mut W) -> SpendbookResult<()> {
    let export = OwnerExport::from_storage(storage, user)?;
    let export_err = |e: std::io::Error| SpendbookError::Export(e.to_string());

    writeln!(writer, "# Spendbook export for {}", export.username).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Keep it secure - it contains all your financial data.")
        .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendbookError::Export(e.to_string()))
}
