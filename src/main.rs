use anyhow::Result;
use clap::{Parser, Subcommand};

use spendbook::cli::{
    current_user, handle_auth_command, handle_budget_command, handle_expense_command,
    handle_export_command, handle_history_command, handle_income_command, handle_report_command,
    AuthCommands, BudgetCommands, ExpenseCommands, ExportCommands, IncomeCommands, ReportCommands,
};
use spendbook::config::{paths::DATA_DIR_ENV, SpendbookPaths, Settings};
use spendbook::crypto::TokenKey;
use spendbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendbook",
    version,
    about = "Terminal personal finance tracker",
    long_about = "Spendbook records your expenses and incomes, keeps monthly spending \
                  caps and tells you how much of each one is left."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Register, log in and out
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Expense management
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income management
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Monthly budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending reports and savings
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export your data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show your recent changes
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SpendbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let Some(command) = cli.command else {
        println!("Spendbook - terminal personal finance tracker");
        println!();
        println!("Run 'spendbook --help' for usage information.");
        println!("Run 'spendbook auth register <username> <email>' to get started.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing Spendbook at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            TokenKey::load_or_generate(&paths.token_key_file())?;
            println!("Initialization complete!");
            println!();
            println!("Run 'spendbook auth register <username> <email>' to create an account.");
        }
        Commands::Config => {
            println!("Spendbook Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("(override with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Login lifetime:  {}h", settings.token_ttl_hours);
        }
        Commands::Auth(cmd) => {
            let key = TokenKey::load_or_generate(&paths.token_key_file())?;
            handle_auth_command(&storage, &settings, &key, cmd)?;
        }
        command => {
            let key = TokenKey::load_or_generate(&paths.token_key_file())?;
            let user = current_user(&storage, &settings, &key)?;

            match command {
                Commands::Expense(cmd) => handle_expense_command(&storage, &settings, &user, cmd)?,
                Commands::Income(cmd) => handle_income_command(&storage, &settings, &user, cmd)?,
                Commands::Budget(cmd) => handle_budget_command(&storage, &settings, &user, cmd)?,
                Commands::Report(cmd) => handle_report_command(&storage, &settings, &user, cmd)?,
                Commands::Export(cmd) => handle_export_command(&storage, &user, cmd)?,
                Commands::History { limit } => handle_history_command(&storage, &user, limit)?,
                Commands::Init | Commands::Config | Commands::Auth(_) => {}
            }
        }
    }

    Ok(())
}
