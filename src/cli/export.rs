//! CLI commands for data export and import

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{BudgeeError, BudgeeResult};
use crate::export::{csv, json, yaml};
use crate::storage::{load_snapshot, Storage};

/// Snapshot export format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON, loadable with --context
    Json,
    /// YAML, human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every allocation to CSV
    Allocations {
        /// Output file path
        output: PathBuf,
    },

    /// Export the whole ledger
    Snapshot {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BudgeeResult<()> {
    match cmd {
        ExportCommands::Allocations { output } => {
            let mut writer = create_output(&output)?;
            let rows = csv::export_allocations_csv(&storage.ledger, &mut writer)?;
            finish(writer)?;
            println!("Exported {} allocations to: {}", rows, output.display());
        }

        ExportCommands::Snapshot { output, format } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_snapshot_json(&storage.ledger, &mut writer)?,
                ExportFormat::Yaml => yaml::export_snapshot_yaml(&storage.ledger, &mut writer)?,
            }
            finish(writer)?;
            println!("Ledger exported to: {}", output.display());
        }
    }

    Ok(())
}

/// Replace the open ledger with the contents of a JSON or YAML export
///
/// Refuses to overwrite a non-empty ledger unless `force` is set.
pub fn handle_import_command(storage: &mut Storage, file: &Path, force: bool) -> BudgeeResult<()> {
    if !storage.ledger.is_empty() && !force {
        return Err(BudgeeError::Validation(format!(
            "{} already has data; use --force to replace it",
            storage.snapshot_path().display()
        )));
    }

    let ledger = match file.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => {
            let contents = std::fs::read_to_string(file).map_err(|e| {
                BudgeeError::Storage(format!("Failed to read {}: {}", file.display(), e))
            })?;
            yaml::import_snapshot_yaml(&contents)?
        }
        _ => load_snapshot(file)?.into_ledger()?,
    };

    storage.ledger = ledger;
    storage.save()?;

    println!(
        "Imported {} people and {} transactions from: {}",
        storage.ledger.person_count(),
        storage.ledger.transaction_count(),
        file.display()
    );
    Ok(())
}

fn create_output(output: &Path) -> BudgeeResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        BudgeeError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> BudgeeResult<()> {
    writer
        .flush()
        .map_err(|e| BudgeeError::Export(format!("Failed to write export: {}", e)))
}
