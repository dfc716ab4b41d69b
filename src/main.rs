use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pennywise::cli::{
    handle_audit_command, handle_earnings_command, handle_expense_command, handle_export_command,
    handle_summary_command,
};
use pennywise::config::{paths::PennywisePaths, settings::Settings};
use pennywise::services::SummaryCache;
use pennywise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pennywise",
    version,
    about = "Track expenses and monthly earnings from the terminal",
    long_about = "Pennywise records what you spend and what you earn each month, \
                  then shows where the money went and how much you saved."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(pennywise::cli::ExpenseCommands),

    /// Monthly earnings commands
    #[command(subcommand)]
    Earnings(pennywise::cli::EarningsCommands),

    /// Show totals, savings and category breakdown for a month
    Summary {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Write the summary as CSV to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenses to a CSV file
    Export {
        /// Output file path
        file: PathBuf,

        /// Only export this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PennywisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    let cache = SummaryCache::new(settings.cache_enabled);

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &cache, &settings, cmd)?;
        }
        Some(Commands::Earnings(cmd)) => {
            handle_earnings_command(&storage, &cache, &settings, cmd)?;
        }
        Some(Commands::Summary { month, output }) => {
            handle_summary_command(&storage, &cache, &settings, month, output.as_deref())?;
        }
        Some(Commands::Export { file, month }) => {
            handle_export_command(&storage, &cache, &settings, &file, month)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("Pennywise Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Calendar zone:   {:?}", settings.calendar_zone);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  Cache enabled:   {}", settings.cache_enabled);

            if !paths.settings_file().exists() {
                settings.save(&paths)?;
                println!();
                println!("Wrote default settings to {}", paths.settings_file().display());
            }
        }
        None => {
            println!("Pennywise - expense and savings tracker");
            println!();
            println!("Run 'pennywise --help' for usage information.");
        }
    }

    if let Some(err) = storage.take_audit_failure() {
        eprintln!("Warning: change saved but not recorded in the audit log: {}", err);
    }

    Ok(())
}
