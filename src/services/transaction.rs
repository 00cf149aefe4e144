//! Transaction service
//!
//! Creation, editing and removal of incomes and expenses.

use crate::audit::{generate_diff, EntityType};
use crate::error::BudgeeResult;
use crate::models::{Category, Money, Transaction, TransactionKind};
use crate::storage::Storage;

/// A transaction with the people it is allocated to
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub transaction: Transaction,
    /// Participant names in link order
    pub participants: Vec<String>,
    /// Per-person share; `None` while unallocated
    pub share: Option<Money>,
}

/// Service for income and expense management
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record a new income or expense
    ///
    /// The sign of `value` is ignored; incomes are stored positive and
    /// expenses negative.
    pub fn create(
        &mut self,
        kind: TransactionKind,
        name: &str,
        value: Money,
        category: Option<Category>,
    ) -> BudgeeResult<Transaction> {
        let transaction = self
            .storage
            .ledger
            .create_transaction(kind, name.trim(), value, category)?
            .clone();
        self.storage.save()?;

        self.storage.log_create(
            EntityType::for_kind(transaction.kind),
            transaction.id().to_string(),
            Some(transaction.name.clone()),
            &transaction,
        )?;

        Ok(transaction)
    }

    /// Get a transaction by name
    pub fn get(&self, name: &str) -> BudgeeResult<&Transaction> {
        self.storage.ledger.find_transaction(name)
    }

    /// Transactions of one kind, or all of them
    pub fn list(&self, kind: Option<TransactionKind>) -> Vec<&Transaction> {
        self.storage
            .ledger
            .transactions()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .collect()
    }

    /// Participants and per-person share of a transaction
    pub fn details(&self, name: &str) -> BudgeeResult<TransactionDetails> {
        let ledger = &self.storage.ledger;
        let transaction = ledger.find_transaction(name)?.clone();
        let participants = ledger
            .participants(name)?
            .into_iter()
            .map(|p| p.name.clone())
            .collect();
        let share = ledger.share(name).ok();

        Ok(TransactionDetails {
            transaction,
            participants,
            share,
        })
    }

    /// Remove a transaction and every allocation of it
    pub fn delete(&mut self, name: &str) -> BudgeeResult<Transaction> {
        let transaction = self.storage.ledger.delete_transaction(name)?;
        self.storage.save()?;

        self.storage.log_delete(
            EntityType::for_kind(transaction.kind),
            transaction.id().to_string(),
            Some(transaction.name.clone()),
            &transaction,
        )?;

        Ok(transaction)
    }

    /// Rename a transaction
    pub fn rename(&mut self, name: &str, new_name: &str) -> BudgeeResult<Transaction> {
        let before = self.storage.ledger.find_transaction(name)?.clone();
        let after = self
            .storage
            .ledger
            .rename_transaction(name, new_name.trim())?
            .clone();
        self.save_and_log_update(&before, &after)?;
        Ok(after)
    }

    /// Replace a transaction's value
    pub fn set_value(&mut self, name: &str, value: Money) -> BudgeeResult<Transaction> {
        let before = self.storage.ledger.find_transaction(name)?.clone();
        let after = self
            .storage
            .ledger
            .update_transaction_value(name, value)?
            .clone();
        self.save_and_log_update(&before, &after)?;
        Ok(after)
    }

    /// Set or clear a transaction's category
    pub fn set_category(
        &mut self,
        name: &str,
        category: Option<Category>,
    ) -> BudgeeResult<Transaction> {
        let before = self.storage.ledger.find_transaction(name)?.clone();
        let after = self
            .storage
            .ledger
            .update_transaction_category(name, category)?
            .clone();
        self.save_and_log_update(&before, &after)?;
        Ok(after)
    }

    fn save_and_log_update(&self, before: &Transaction, after: &Transaction) -> BudgeeResult<()> {
        self.storage.save()?;

        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };

        self.storage.log_update(
            EntityType::for_kind(after.kind),
            after.id().to_string(),
            Some(after.name.clone()),
            before,
            after,
            diff,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::BudgeePaths;
    use crate::ledger::Ledger;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgeePaths::with_base_dir(temp_dir.path().to_path_buf());
        let snapshot = paths.ledger_file();
        let storage = Storage::with_ledger(paths, snapshot, Ledger::new());
        (temp_dir, storage)
    }

    #[test]
    fn test_create_canonicalizes_sign() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = TransactionService::new(&mut storage);

        let rent = service
            .create(
                TransactionKind::Expense,
                "Rent",
                Money::from_units(1000),
                Some(Category::Housing),
            )
            .unwrap();
        assert_eq!(rent.value, Money::from_units(-1000));

        let salary = service
            .create(TransactionKind::Income, "Salary", Money::from_units(-3000), None)
            .unwrap();
        assert_eq!(salary.value, Money::from_units(3000));

        assert!(service
            .create(TransactionKind::Income, "rent", Money::from_units(1), None)
            .unwrap_err()
            .is_already_exists());

        assert_eq!(service.list(Some(TransactionKind::Expense)).len(), 1);
        assert_eq!(service.list(None).len(), 2);

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries[0].entity_type, EntityType::Expense);
        assert_eq!(entries[1].entity_type, EntityType::Income);
    }

    #[test]
    fn test_set_value_and_category() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = TransactionService::new(&mut storage);
        service
            .create(TransactionKind::Expense, "Gym", Money::from_units(40), None)
            .unwrap();

        let updated = service.set_value("gym", Money::from_cents(4550)).unwrap();
        assert_eq!(updated.value, Money::from_cents(-4550));

        // Zero is a real value, not "no change"
        let zeroed = service.set_value("Gym", Money::zero()).unwrap();
        assert!(zeroed.value.is_zero());

        let categorized = service
            .set_category("Gym", Some(Category::HealthFitness))
            .unwrap();
        assert_eq!(categorized.category, Some(Category::HealthFitness));
        assert_eq!(service.set_category("Gym", None).unwrap().category, None);

        let entries = storage.audit().unwrap().read_all().unwrap();
        let updates: Vec<_> = entries
            .iter()
            .filter(|e| e.operation == Operation::Update)
            .collect();
        assert_eq!(updates.len(), 4);
        assert_eq!(
            updates[0].diff_summary.as_deref(),
            Some("value: -4000 -> -4550")
        );
        assert_eq!(
            updates[2].diff_summary.as_deref(),
            Some("category: (added) -> \"Health & Fitness\"")
        );
    }

    #[test]
    fn test_rename_and_delete() {
        let (_temp_dir, mut storage) = create_test_storage();
        storage.ledger.create_person("Alice").unwrap();
        let mut service = TransactionService::new(&mut storage);
        service
            .create(TransactionKind::Income, "Freelance", Money::from_units(500), None)
            .unwrap();
        service
            .create(TransactionKind::Income, "Bonus", Money::from_units(100), None)
            .unwrap();

        assert!(service
            .rename("Freelance", "bonus")
            .unwrap_err()
            .is_already_exists());

        let renamed = service.rename("Freelance", "Freelance Work").unwrap();
        assert_eq!(renamed.name, "Freelance Work");
        assert!(service.get("Freelance").unwrap_err().is_not_found());

        let removed = service.delete("freelance work").unwrap();
        assert_eq!(removed.value, Money::from_units(500));
        assert_eq!(service.list(None).len(), 1);
    }

    #[test]
    fn test_details() {
        let (_temp_dir, mut storage) = create_test_storage();
        storage.ledger.create_person("Alice").unwrap();
        storage.ledger.create_person("Bob").unwrap();
        let mut service = TransactionService::new(&mut storage);
        service
            .create(TransactionKind::Expense, "Rent", Money::from_units(1000), None)
            .unwrap();

        let details = service.details("Rent").unwrap();
        assert!(details.participants.is_empty());
        assert_eq!(details.share, None);

        storage.ledger.link("Alice", "Rent").unwrap();
        storage.ledger.link("Bob", "Rent").unwrap();
        let service = TransactionService::new(&mut storage);
        let details = service.details("Rent").unwrap();
        assert_eq!(details.participants, vec!["Alice", "Bob"]);
        assert_eq!(details.share, Some(Money::from_units(-500)));
    }
}
