//! Storage layer for Budgee
//!
//! The whole ledger lives in one JSON snapshot written atomically. A
//! `Storage` owns the in-memory ledger loaded from that snapshot, the path
//! it is saved back to, and the audit logger mutations are recorded in.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use snapshot::{load_snapshot, save_snapshot, PersonRecord, Snapshot, TransactionRecord};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::{BudgeePaths, Settings};
use crate::error::{BudgeeError, BudgeeResult};
use crate::ledger::Ledger;

/// Exclusive handle on a loaded ledger and the file it came from
pub struct Storage {
    paths: BudgeePaths,
    snapshot_path: PathBuf,
    audit: Option<AuditLogger>,
    pub ledger: Ledger,
}

impl Storage {
    /// Open the ledger for this session
    ///
    /// An explicit `context` file must already exist; it is checked before
    /// anything is read. Without one, the default ledger file is used and a
    /// missing file means an empty ledger.
    pub fn open(
        paths: BudgeePaths,
        settings: &Settings,
        context: Option<PathBuf>,
    ) -> BudgeeResult<Self> {
        let ledger = match &context {
            Some(path) if !path.is_file() => {
                return Err(BudgeeError::Storage(format!(
                    "Context file not found: {}",
                    path.display()
                )));
            }
            Some(path) => load_snapshot(path)?.into_ledger()?,
            None => {
                let default = paths.ledger_file();
                if default.exists() {
                    load_snapshot(&default)?.into_ledger()?
                } else {
                    Ledger::new()
                }
            }
        };

        let snapshot_path = context.unwrap_or_else(|| paths.ledger_file());
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            paths,
            snapshot_path,
            audit,
            ledger,
        })
    }

    /// Wrap an in-memory ledger that saves to `snapshot_path` (useful for testing)
    pub fn with_ledger(paths: BudgeePaths, snapshot_path: PathBuf, ledger: Ledger) -> Self {
        Self {
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
            snapshot_path,
            ledger,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgeePaths {
        &self.paths
    }

    /// Get the file the ledger is saved to
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Write the ledger back to its snapshot file
    pub fn save(&self) -> BudgeeResult<()> {
        save_snapshot(&Snapshot::from_ledger(&self.ledger), &self.snapshot_path)
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgeeResult<()> {
        self.log(|| AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> BudgeeResult<()> {
        self.log(|| {
            AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
                diff_summary,
            )
        })
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgeeResult<()> {
        self.log(|| AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    fn log(&self, entry: impl FnOnce() -> AuditEntry) -> BudgeeResult<()> {
        match &self.audit {
            Some(logger) => {
                self.paths.ensure_directories()?;
                logger.append(&entry())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> BudgeePaths {
        BudgeePaths::with_base_dir(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_open_default_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(paths(&temp_dir), &Settings::default(), None).unwrap();

        assert!(storage.ledger.is_empty());
        assert_eq!(
            storage.snapshot_path(),
            temp_dir.path().join("data").join("ledger.json")
        );
    }

    #[test]
    fn test_missing_context_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.json");

        let result = Storage::open(paths(&temp_dir), &Settings::default(), Some(missing));
        assert!(matches!(result, Err(BudgeeError::Storage(_))));
    }

    #[test]
    fn test_save_and_reopen_context() {
        let temp_dir = TempDir::new().unwrap();
        let context = temp_dir.path().join("shared.json");
        std::fs::write(&context, "{}").unwrap();

        let mut storage =
            Storage::open(paths(&temp_dir), &Settings::default(), Some(context.clone())).unwrap();
        storage.ledger.create_person("Alice").unwrap();
        storage
            .ledger
            .create_transaction(TransactionKind::Expense, "Rent", Money::from_units(800), None)
            .unwrap();
        storage.ledger.link("Alice", "Rent").unwrap();
        storage.save().unwrap();

        let reopened =
            Storage::open(paths(&temp_dir), &Settings::default(), Some(context)).unwrap();
        assert_eq!(reopened.ledger, storage.ledger);
        assert!(!paths(&temp_dir).ledger_file().exists());
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let storage = Storage::open(paths(&temp_dir), &settings, None).unwrap();

        assert!(storage.audit().is_none());
        storage
            .log_create(EntityType::Person, "alice", None, &"Alice")
            .unwrap();
        assert!(!paths(&temp_dir).audit_log().exists());
    }

    #[test]
    fn test_log_operations() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(paths(&temp_dir), &Settings::default(), None).unwrap();

        storage
            .log_create(EntityType::Person, "alice", Some("Alice".into()), &"Alice")
            .unwrap();
        storage
            .log_delete(EntityType::Person, "alice", Some("Alice".into()), &"Alice")
            .unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entity_id, "alice");
    }
}
