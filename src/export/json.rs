//! JSON snapshot export
//!
//! The export is a regular ledger snapshot with extra metadata fields, so an
//! exported file can be passed straight back as a `--context`.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgeeError, BudgeeResult};
use crate::ledger::Ledger;
use crate::storage::Snapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot plus export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub metadata: ExportMetadata,

    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Counts for a quick look at an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub person_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    /// Transactions nobody is linked to
    pub unallocated_count: usize,
}

impl SnapshotExport {
    /// Capture the ledger for export
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let snapshot = Snapshot::from_ledger(ledger);
        let metadata = ExportMetadata {
            person_count: snapshot.persons.len(),
            income_count: snapshot.incomes.len(),
            expense_count: snapshot.expenses.len(),
            unallocated_count: ledger.unallocated().count(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            snapshot,
        }
    }
}

/// Export the ledger as pretty-printed JSON
pub fn export_snapshot_json<W: Write>(ledger: &Ledger, writer: &mut W) -> BudgeeResult<()> {
    let export = SnapshotExport::from_ledger(ledger);
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| BudgeeError::Export(e.to_string()))
}
