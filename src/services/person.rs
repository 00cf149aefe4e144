//! Person service
//!
//! Person management and allocation of transactions to people. Every
//! mutation is saved to the snapshot and then recorded in the audit log.

use serde::Serialize;

use crate::audit::{association_id, EntityType};
use crate::error::BudgeeResult;
use crate::ledger::PersonSummary;
use crate::models::{Person, Transaction};
use crate::storage::Storage;

/// Audit payload for a person/transaction link
#[derive(Debug, Clone, Serialize)]
struct Association<'a> {
    person: &'a str,
    transaction: &'a str,
}

/// Service for person management
pub struct PersonService<'a> {
    storage: &'a mut Storage,
}

impl<'a> PersonService<'a> {
    /// Create a new person service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Register a new person
    pub fn create(&mut self, name: &str) -> BudgeeResult<Person> {
        let person = self.storage.ledger.create_person(name.trim())?.clone();
        self.storage.save()?;

        self.storage.log_create(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name.clone()),
            &person,
        )?;

        Ok(person)
    }

    /// Get a person by name
    pub fn get(&self, name: &str) -> BudgeeResult<&Person> {
        self.storage.ledger.find_person(name)
    }

    /// All people, ordered by id
    pub fn list(&self) -> Vec<&Person> {
        self.storage.ledger.people().collect()
    }

    /// Remove a person, dropping them from every transaction they shared
    pub fn delete(&mut self, name: &str) -> BudgeeResult<Person> {
        let person = self.storage.ledger.delete_person(name)?;
        self.storage.save()?;

        self.storage.log_delete(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name.clone()),
            &person,
        )?;

        Ok(person)
    }

    /// Rename a person
    pub fn rename(&mut self, name: &str, new_name: &str) -> BudgeeResult<Person> {
        let before = self.storage.ledger.find_person(name)?.clone();
        let person = self
            .storage
            .ledger
            .rename_person(name, new_name.trim())?
            .clone();
        self.storage.save()?;

        self.storage.log_update(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name.clone()),
            &before,
            &person,
            Some(format!("name: {} -> {}", before.name, person.name)),
        )?;

        Ok(person)
    }

    /// Allocate a transaction to a person
    ///
    /// Returns `false` without saving if they were already linked.
    pub fn link(&mut self, person: &str, transaction: &str) -> BudgeeResult<bool> {
        if !self.storage.ledger.link(person, transaction)? {
            return Ok(false);
        }
        self.storage.save()?;

        let (person, transaction) = self.resolve(person, transaction)?;
        self.storage.log_create(
            EntityType::Association,
            association_id(person.id().as_str(), transaction.id().as_str()),
            None,
            &Association {
                person: &person.name,
                transaction: &transaction.name,
            },
        )?;

        Ok(true)
    }

    /// Remove a person from a transaction
    ///
    /// Returns `false` without saving if they were not linked.
    pub fn unlink(&mut self, person: &str, transaction: &str) -> BudgeeResult<bool> {
        if !self.storage.ledger.unlink(person, transaction)? {
            return Ok(false);
        }
        self.storage.save()?;

        let (person, transaction) = self.resolve(person, transaction)?;
        self.storage.log_delete(
            EntityType::Association,
            association_id(person.id().as_str(), transaction.id().as_str()),
            None,
            &Association {
                person: &person.name,
                transaction: &transaction.name,
            },
        )?;

        Ok(true)
    }

    /// Totals and allocated transactions for one person
    pub fn summary(&self, name: &str) -> BudgeeResult<PersonSummary> {
        self.storage.ledger.person_summary(name)
    }

    fn resolve(&self, person: &str, transaction: &str) -> BudgeeResult<(Person, Transaction)> {
        let ledger = &self.storage.ledger;
        Ok((
            ledger.find_person(person)?.clone(),
            ledger.find_transaction(transaction)?.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::BudgeePaths;
    use crate::ledger::Ledger;
    use crate::models::{Money, TransactionKind};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgeePaths::with_base_dir(temp_dir.path().to_path_buf());
        let snapshot = paths.ledger_file();
        let storage = Storage::with_ledger(paths, snapshot, Ledger::new());
        (temp_dir, storage)
    }

    fn add_rent(storage: &mut Storage) {
        storage
            .ledger
            .create_transaction(TransactionKind::Expense, "Rent", Money::from_units(1000), None)
            .unwrap();
    }

    #[test]
    fn test_create_person() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = PersonService::new(&mut storage);

        let person = service.create("  Alice ").unwrap();
        assert_eq!(person.name, "Alice");
        assert!(service.create("ALICE").unwrap_err().is_already_exists());
        assert!(service.create("!!!").unwrap_err().is_validation());

        assert!(storage.snapshot_path().exists());
        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Person);
        assert_eq!(entries[0].entity_id, "alice");
    }

    #[test]
    fn test_link_and_unlink() {
        let (_temp_dir, mut storage) = create_test_storage();
        add_rent(&mut storage);
        let mut service = PersonService::new(&mut storage);
        service.create("Alice").unwrap();
        service.create("Bob").unwrap();

        assert!(service.link("Alice", "rent").unwrap());
        assert!(!service.link("alice", "Rent").unwrap());
        assert!(service.link("Bob", "Rent").unwrap());

        let summary = service.summary("Alice").unwrap();
        assert_eq!(summary.total_expenses, Money::from_units(-500));

        assert!(service.unlink("Bob", "Rent").unwrap());
        assert!(!service.unlink("Bob", "Rent").unwrap());
        assert_eq!(
            service.summary("Alice").unwrap().total_expenses,
            Money::from_units(-1000)
        );

        let entries = storage.audit().unwrap().read_all().unwrap();
        let associations: Vec<_> = entries
            .iter()
            .filter(|e| e.entity_type == EntityType::Association)
            .collect();
        assert_eq!(associations.len(), 3);
        assert_eq!(associations[0].entity_id, "alice:rent");
        assert_eq!(associations[2].operation, Operation::Delete);
    }

    #[test]
    fn test_link_unknown_entities() {
        let (_temp_dir, mut storage) = create_test_storage();
        add_rent(&mut storage);
        let mut service = PersonService::new(&mut storage);
        service.create("Alice").unwrap();

        assert!(service.link("Ghost", "Rent").unwrap_err().is_not_found());
        assert!(service.link("Alice", "Nothing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename_keeps_links() {
        let (_temp_dir, mut storage) = create_test_storage();
        add_rent(&mut storage);
        let mut service = PersonService::new(&mut storage);
        service.create("Chloe").unwrap();
        service.link("Chloe", "Rent").unwrap();

        let renamed = service.rename("chloe", "Chloé Dupont").unwrap();
        assert_eq!(renamed.name, "Chloé Dupont");
        assert!(service.get("Chloe").unwrap_err().is_not_found());
        assert_eq!(
            service.summary("chloe dupont").unwrap().total_expenses,
            Money::from_units(-1000)
        );

        let entries = storage.audit().unwrap().read_all().unwrap();
        let update = entries.last().unwrap();
        assert_eq!(update.operation, Operation::Update);
        assert_eq!(
            update.diff_summary.as_deref(),
            Some("name: Chloe -> Chloé Dupont")
        );
    }

    #[test]
    fn test_delete_person() {
        let (_temp_dir, mut storage) = create_test_storage();
        add_rent(&mut storage);
        let mut service = PersonService::new(&mut storage);
        service.create("Alice").unwrap();
        service.link("Alice", "Rent").unwrap();

        let removed = service.delete("Alice").unwrap();
        assert_eq!(removed.name, "Alice");
        assert!(service.list().is_empty());
        assert!(service.delete("Alice").unwrap_err().is_not_found());

        assert!(storage.ledger.share("Rent").is_err());
    }
}
