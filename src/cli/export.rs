//! Export CLI commands
//!
//! Writes to `--output` when given, otherwise to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{SpendbookError, SpendbookResult};
use crate::export::{export_expenses_csv, export_json, export_yaml};
use crate::ledger::ExpenseFilter;
use crate::models::User;
use crate::services::ExpenseService;
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Expenses as CSV
    Csv {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Everything you own as JSON
    Json {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Everything you own as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_export_command(
    storage: &Storage,
    user: &User,
    cmd: ExportCommands,
) -> SpendbookResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let expenses = ExpenseService::new(storage).list(user.id, &ExpenseFilter::new())?;
            write_output(output.as_deref(), |w| export_expenses_csv(&expenses, w))?;
            report_written(output.as_deref(), &format!("{} expense(s)", expenses.len()));
        }
        ExportCommands::Json { output } => {
            write_output(output.as_deref(), |w| {
                export_json(storage, user, &mut *w)?;
                writeln!(w).map_err(|e| SpendbookError::Export(e.to_string()))
            })?;
            report_written(output.as_deref(), "full export");
        }
        ExportCommands::Yaml { output } => {
            write_output(output.as_deref(), |mut w| export_yaml(storage, user, &mut w))?;
            report_written(output.as_deref(), "full export");
        }
    }

    Ok(())
}

fn write_output<F>(output: Option<&Path>, export: F) -> SpendbookResult<()>
where
    F: FnOnce(&mut dyn Write) -> SpendbookResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SpendbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer as &mut dyn Write)?;
            writer
                .flush()
                .map_err(|e| SpendbookError::Export(e.to_string()))
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(&mut writer as &mut dyn Write)?;
            writer
                .flush()
                .map_err(|e| SpendbookError::Export(e.to_string()))
        }
    }
}

fn report_written(output: Option<&Path>, what: &str) {
    // stdout carries the data itself when no file is given
    if let Some(path) = output {
        println!("Exported {} to {}", what, path.display());
    }
}
