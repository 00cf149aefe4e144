//! Append-only audit log of ledger mutations
//!
//! One JSON object per line. Entries are only ever appended; `history`
//! reads them back, optionally narrowed to one kind of entity or to
//! everything recorded for a single person or transaction.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BudgeeError, BudgeeResult};
use crate::models::normalize;

use super::entry::{AuditEntry, EntityType};

/// Separates the person id from the transaction id in an association's entity id
pub const ASSOCIATION_SEPARATOR: char = ':';

/// Entity id recorded for a person/transaction link
pub fn association_id(person_id: &str, transaction_id: &str) -> String {
    format!("{}{}{}", person_id, ASSOCIATION_SEPARATOR, transaction_id)
}

/// Which entries `history` should show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Only entries about this kind of entity
    pub entity_type: Option<EntityType>,
    /// Only entries about the entity with this name, matched by id. Links
    /// match when either side has the name.
    pub name: Option<String>,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if self.entity_type.is_some_and(|t| t != entry.entity_type) {
            return false;
        }
        let Some(name) = &self.name else {
            return true;
        };

        let id = normalize(name);
        match entry.entity_type {
            EntityType::Association => entry
                .entity_id
                .split(ASSOCIATION_SEPARATOR)
                .any(|side| side == id),
            _ => entry.entity_id == id,
        }
    }
}

/// Writes and reads the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush it to disk
    pub fn append(&self, entry: &AuditEntry) -> BudgeeResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BudgeeError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| BudgeeError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| BudgeeError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every entry, oldest first
    ///
    /// A missing log is empty.
    pub fn read_all(&self) -> BudgeeResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BudgeeError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_num = index + 1;
            let line = line.map_err(|e| {
                BudgeeError::Io(format!("Failed to read audit log line {}: {}", line_num, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                BudgeeError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num, e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `limit` entries that pass `filter`, oldest first
    pub fn read_recent(&self, filter: &HistoryFilter, limit: usize) -> BudgeeResult<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .read_all()?
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect();
        let start = entries.len().saturating_sub(limit);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn person(name: &str) -> AuditEntry {
        AuditEntry::create(
            EntityType::Person,
            normalize(name),
            Some(name.to_string()),
            &json!({ "name": name }),
        )
    }

    fn link(person: &str, transaction: &str) -> AuditEntry {
        AuditEntry::create(
            EntityType::Association,
            association_id(&normalize(person), &normalize(transaction)),
            None,
            &json!({ "person": person, "transaction": transaction }),
        )
    }

    fn name_filter(name: &str) -> HistoryFilter {
        HistoryFilter {
            name: Some(name.to_string()),
            ..HistoryFilter::default()
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let (logger, temp) = logger();
        logger.append(&person("Alice")).unwrap();
        logger.append(&link("Alice", "Rent")).unwrap();

        // A second handle on the same file sees both lines
        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].entity_id, "alice:rent");
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger
            .read_recent(&HistoryFilter::default(), 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_recent_keeps_the_tail() {
        let (logger, _temp) = logger();
        for i in 0..10 {
            logger.append(&person(&format!("Person {}", i))).unwrap();
        }

        let recent = logger.read_recent(&HistoryFilter::default(), 3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["person-7", "person-8", "person-9"]);
    }

    #[test]
    fn test_filter_by_entity_type() {
        let (logger, _temp) = logger();
        logger.append(&person("Alice")).unwrap();
        logger.append(&link("Alice", "Rent")).unwrap();
        logger.append(&person("Bob")).unwrap();

        let filter = HistoryFilter {
            entity_type: Some(EntityType::Person),
            ..HistoryFilter::default()
        };
        let people = logger.read_recent(&filter, 10).unwrap();
        assert_eq!(people.len(), 2);
        assert!(people.iter().all(|e| e.entity_type == EntityType::Person));
    }

    #[test]
    fn test_filter_by_name_includes_links() {
        let (logger, _temp) = logger();
        logger.append(&person("Chloé")).unwrap();
        logger.append(&person("Bob")).unwrap();
        logger.append(&link("Chloé", "Rent")).unwrap();
        logger.append(&link("Bob", "Rent")).unwrap();

        let chloe = logger.read_recent(&name_filter("chloe"), 10).unwrap();
        let ids: Vec<&str> = chloe.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["chloe", "chloe:rent"]);

        let rent = logger.read_recent(&name_filter("RENT"), 10).unwrap();
        assert_eq!(rent.len(), 2);
        assert!(logger.read_recent(&name_filter("Carol"), 10).unwrap().is_empty());
    }

    #[test]
    fn test_filter_limit_applies_after_matching() {
        let (logger, _temp) = logger();
        logger.append(&person("Alice")).unwrap();
        for i in 0..5 {
            logger.append(&person(&format!("Filler {}", i))).unwrap();
        }

        let alice = logger.read_recent(&name_filter("Alice"), 1).unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].entity_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let (logger, temp) = logger();
        logger.append(&person("Alice")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(temp.path().join("audit.log"))
            .and_then(|mut f| writeln!(f, "{{not json"))
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
