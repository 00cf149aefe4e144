//! YAML snapshot export
//!
//! Same content as the JSON export, for reading and hand-editing.

use std::io::Write;

use super::json::SnapshotExport;
use crate::error::{BudgeeError, BudgeeResult};
use crate::ledger::Ledger;

/// Export the ledger as YAML with a comment header
pub fn export_snapshot_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> BudgeeResult<()> {
    let export = SnapshotExport::from_ledger(ledger);

    let header = format!(
        "# Budgee ledger export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BudgeeError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgeeError::Export(e.to_string()))
}

/// Read a YAML export back into a ledger
pub fn import_snapshot_yaml(yaml_str: &str) -> BudgeeResult<Ledger> {
    let export: SnapshotExport = serde_yaml::from_str(yaml_str)
        .map_err(|e| BudgeeError::MalformedSnapshot(e.to_string()))?;
    export.snapshot.into_ledger()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionKind};

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_person("Alice").unwrap();
        ledger.create_person("Bob").unwrap();
        ledger
            .create_transaction(
                TransactionKind::Expense,
                "Studio Time",
                Money::from_cents(25050),
                Some(Category::MusicProduction),
            )
            .unwrap();
        ledger.link("Alice", "Studio Time").unwrap();
        ledger.link("Bob", "Studio Time").unwrap();
        ledger
    }

    #[test]
    fn test_yaml_export() {
        let mut output = Vec::new();
        export_snapshot_yaml(&ledger(), &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# Budgee ledger export"));
        assert!(yaml_string.contains("Studio Time"));
        assert!(yaml_string.contains("Music Production"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let source = ledger();
        let mut output = Vec::new();
        export_snapshot_yaml(&source, &mut output).unwrap();

        let imported = import_snapshot_yaml(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported, source);
        assert_eq!(
            imported.share("studio time").unwrap(),
            Money::from_cents(-12525)
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = import_snapshot_yaml("persons: [unterminated").unwrap_err();
        assert!(matches!(err, BudgeeError::MalformedSnapshot(_)));
    }
}
