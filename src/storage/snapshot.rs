//! Serializable snapshot of a ledger
//!
//! Associations are written as name lists on both sides so the file never
//! contains nested or cyclic structures. Loading rebuilds the ledger in
//! four passes: people, transactions, each person's references, each
//! transaction's references.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::file_io::{read_json_required, write_json_atomic};
use crate::error::{BudgeeError, BudgeeResult};
use crate::ledger::Ledger;
use crate::models::{Category, Money, PersonId, Transaction, TransactionId, TransactionKind};

/// A person and the names of the transactions they share
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,

    #[serde(default)]
    pub transactions: Vec<String>,

    /// Older files list incomes and expenses separately; merged on load
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incomes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expenses: Vec<String>,
}

/// An income or expense and the names of the people sharing it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub name: String,

    /// Signed amount in currency units
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default)]
    pub persons: Vec<String>,
}

/// Whole-ledger snapshot as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub persons: Vec<PersonRecord>,

    #[serde(default)]
    pub incomes: Vec<TransactionRecord>,

    #[serde(default)]
    pub expenses: Vec<TransactionRecord>,
}

impl Snapshot {
    /// Capture the ledger's entities and associations
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let persons = ledger
            .people()
            .map(|person| PersonRecord {
                name: person.name.clone(),
                transactions: ledger
                    .linked_transaction_ids(&person.id())
                    .iter()
                    .filter_map(|id| ledger.transaction_by_id(id))
                    .map(|t| t.name.clone())
                    .collect(),
                ..PersonRecord::default()
            })
            .collect();

        let record = |transaction: &Transaction| TransactionRecord {
            name: transaction.name.clone(),
            amount: transaction.value.to_decimal(),
            category: transaction.category,
            persons: ledger
                .linked_person_ids(&transaction.id())
                .iter()
                .filter_map(|id| ledger.person_by_id(id))
                .map(|p| p.name.clone())
                .collect(),
        };

        Self {
            persons,
            incomes: ledger.incomes().map(record).collect(),
            expenses: ledger.expenses().map(record).collect(),
        }
    }

    /// Rebuild a ledger from the snapshot
    pub fn into_ledger(self) -> BudgeeResult<Ledger> {
        let mut ledger = Ledger::new();

        for record in &self.persons {
            ledger.create_person(&record.name)?;
        }

        let transactions = self
            .incomes
            .iter()
            .map(|r| (TransactionKind::Income, r))
            .chain(self.expenses.iter().map(|r| (TransactionKind::Expense, r)));

        for (kind, record) in transactions.clone() {
            let amount = Money::from_decimal(record.amount).ok_or_else(|| {
                BudgeeError::MalformedSnapshot(format!(
                    "{} '{}' has an invalid amount: {}",
                    kind, record.name, record.amount
                ))
            })?;
            ledger.create_transaction(kind, &record.name, amount, record.category)?;
        }

        let mut person_links: BTreeMap<PersonId, Vec<TransactionId>> = BTreeMap::new();
        for record in &self.persons {
            let referenced_by = format!("Person '{}'", record.name);
            let names = record
                .transactions
                .iter()
                .chain(&record.incomes)
                .chain(&record.expenses);

            let mut ids = Vec::new();
            for name in names {
                let id = ledger
                    .find_transaction(name)
                    .map_err(|_| BudgeeError::DanglingReference {
                        entity_type: "Transaction",
                        identifier: name.clone(),
                        referenced_by: referenced_by.clone(),
                    })?
                    .id();
                push_unique(&mut ids, id, &referenced_by)?;
            }
            person_links.insert(PersonId::from_name(&record.name), ids);
        }

        let mut transaction_links: BTreeMap<TransactionId, Vec<PersonId>> = BTreeMap::new();
        for (kind, record) in transactions {
            let referenced_by = format!("{} '{}'", kind, record.name);

            let mut ids = Vec::new();
            for name in &record.persons {
                let id = ledger
                    .find_person(name)
                    .map_err(|_| BudgeeError::DanglingReference {
                        entity_type: "Person",
                        identifier: name.clone(),
                        referenced_by: referenced_by.clone(),
                    })?
                    .id();
                push_unique(&mut ids, id, &referenced_by)?;
            }
            transaction_links.insert(TransactionId::from_name(&record.name), ids);
        }

        ledger.restore_links(person_links, transaction_links)?;
        Ok(ledger)
    }
}

fn push_unique<T: PartialEq + std::fmt::Display>(
    ids: &mut Vec<T>,
    id: T,
    referenced_by: &str,
) -> BudgeeResult<()> {
    if ids.contains(&id) {
        return Err(BudgeeError::MalformedSnapshot(format!(
            "{} references '{}' more than once",
            referenced_by, id
        )));
    }
    ids.push(id);
    Ok(())
}

/// Read a snapshot file; the file must exist
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> BudgeeResult<Snapshot> {
    read_json_required(path)
}

/// Write a snapshot file atomically
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> BudgeeResult<()> {
    write_json_atomic(path, snapshot)
}
