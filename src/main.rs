use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use budgee::cli::{
    handle_export_command, handle_history_command, handle_import_command, handle_person_command,
    handle_transaction_command, ExportCommands, HistoryArgs, PersonCommands, TransactionCommands,
};
use budgee::config::{BudgeePaths, Settings};
use budgee::display::format_summary;
use budgee::storage::{save_snapshot, Snapshot, Storage};

#[derive(Parser)]
#[command(
    name = "budgee",
    version,
    about = "Track incomes and expenses shared between people",
    long_about = "Budgee records incomes and expenses, allocates them to the people \
                  who share them, and reports each person's share, totals and profits."
)]
struct Cli {
    /// Ledger file to load and save instead of the default one
    #[arg(long, global = true, env = "BUDGEE_CONTEXT", value_name = "PATH")]
    context: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every person, income and expense
    Summary,

    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Income and expense management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Export the ledger
    #[command(subcommand)]
    Export(ExportCommands),

    /// Replace the ledger with a JSON or YAML export
    Import {
        /// File to import
        file: PathBuf,
        /// Overwrite a ledger that already has data
        #[arg(long)]
        force: bool,
    },

    /// Show recent changes from the audit log
    History(HistoryArgs),

    /// Write default settings and an empty ledger
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgeePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let context = cli.context;

    match cli.command {
        Some(Commands::Init) => {
            handle_init(&paths, &settings, context)?;
        }
        Some(Commands::Config) => {
            handle_config(&paths, &settings, context.as_deref());
        }
        Some(Commands::Person(cmd)) => {
            let mut storage = Storage::open(paths, &settings, context)?;
            handle_person_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let mut storage = Storage::open(paths, &settings, context)?;
            handle_transaction_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let storage = Storage::open(paths, &settings, context)?;
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Import { file, force }) => {
            let mut storage = Storage::open(paths, &settings, context)?;
            handle_import_command(&mut storage, &file, force)?;
        }
        Some(Commands::History(args)) => {
            let storage = Storage::open(paths, &settings, context)?;
            handle_history_command(&storage, &args)?;
        }
        Some(Commands::Summary) | None => {
            let storage = Storage::open(paths, &settings, context)?;
            print!(
                "{}",
                format_summary(&storage.ledger, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

fn handle_init(paths: &BudgeePaths, settings: &Settings, context: Option<PathBuf>) -> Result<()> {
    println!("Initializing Budgee at: {}", paths.base_dir().display());
    paths.ensure_directories()?;
    settings.save(paths)?;

    let ledger_file = context.unwrap_or_else(|| paths.ledger_file());
    if ledger_file.exists() {
        println!("Ledger already exists: {}", ledger_file.display());
    } else {
        save_snapshot(&Snapshot::default(), &ledger_file)?;
        println!("Created empty ledger: {}", ledger_file.display());
    }

    Ok(())
}

fn handle_config(paths: &BudgeePaths, settings: &Settings, context: Option<&Path>) {
    println!("Budgee Configuration");
    println!("====================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Default ledger:   {}", paths.ledger_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    if let Some(context) = context {
        println!("Context ledger:   {}", context.display());
    }
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Audit enabled:   {}", settings.audit_enabled);
}
