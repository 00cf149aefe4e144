//! The in-memory ledger of people, transactions and who shares what
//!
//! People and transactions never point at each other. The ledger owns two
//! index maps, person id -> transaction ids and transaction id -> person ids,
//! and every mutating method keeps them mirror images of each other. Each
//! method validates everything it needs before touching either map, so a
//! failed call leaves the ledger unchanged.

mod aggregates;

pub use aggregates::{PersonSummary, TransactionShare};

use std::collections::BTreeMap;

use crate::error::{BudgeeError, BudgeeResult};
use crate::models::{
    Category, Money, Person, PersonId, Transaction, TransactionId, TransactionKind,
};

/// People, transactions and their associations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    people: BTreeMap<PersonId, Person>,
    transactions: BTreeMap<TransactionId, Transaction>,
    /// Index: person id -> linked transaction ids, in link order
    person_links: BTreeMap<PersonId, Vec<TransactionId>>,
    /// Index: transaction id -> linked person ids, in link order
    transaction_links: BTreeMap<TransactionId, Vec<PersonId>>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    // ---- identity & lookup ----

    /// Find a person by name (any spelling that normalizes to the same id)
    pub fn find_person(&self, name: &str) -> BudgeeResult<&Person> {
        self.people
            .get(&PersonId::from_name(name))
            .ok_or_else(|| BudgeeError::person_not_found(name))
    }

    /// Find a transaction by name
    pub fn find_transaction(&self, name: &str) -> BudgeeResult<&Transaction> {
        self.transactions
            .get(&TransactionId::from_name(name))
            .ok_or_else(|| BudgeeError::transaction_not_found(name))
    }

    /// Fail with `AlreadyExists` if a person with the same id is present
    pub fn assert_person_absent(&self, name: &str) -> BudgeeResult<()> {
        match self.people.get(&PersonId::from_name(name)) {
            Some(existing) => Err(BudgeeError::person_exists(&existing.name)),
            None => Ok(()),
        }
    }

    /// Fail with `AlreadyExists` if a transaction with the same id is present
    pub fn assert_transaction_absent(&self, name: &str) -> BudgeeResult<()> {
        match self.transactions.get(&TransactionId::from_name(name)) {
            Some(existing) => Err(BudgeeError::transaction_exists(&existing.name)),
            None => Ok(()),
        }
    }

    fn person_id(&self, name: &str) -> BudgeeResult<PersonId> {
        let id = PersonId::from_name(name);
        if self.people.contains_key(&id) {
            Ok(id)
        } else {
            Err(BudgeeError::person_not_found(name))
        }
    }

    fn transaction_id(&self, name: &str) -> BudgeeResult<TransactionId> {
        let id = TransactionId::from_name(name);
        if self.transactions.contains_key(&id) {
            Ok(id)
        } else {
            Err(BudgeeError::transaction_not_found(name))
        }
    }

    // ---- read accessors ----

    /// All people, ordered by id
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All transactions, ordered by id
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// All incomes, ordered by id
    pub fn incomes(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions().filter(|t| t.is_income())
    }

    /// All expenses, ordered by id
    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions().filter(|t| t.is_expense())
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.transactions.is_empty()
    }

    /// Transactions linked to a person, in link order
    pub fn person_transactions(&self, name: &str) -> BudgeeResult<Vec<&Transaction>> {
        let id = self.person_id(name)?;
        Ok(self
            .linked_transaction_ids(&id)
            .iter()
            .filter_map(|tid| self.transactions.get(tid))
            .collect())
    }

    /// People linked to a transaction, in link order
    pub fn participants(&self, name: &str) -> BudgeeResult<Vec<&Person>> {
        let id = self.transaction_id(name)?;
        Ok(self
            .linked_person_ids(&id)
            .iter()
            .filter_map(|pid| self.people.get(pid))
            .collect())
    }

    /// Whether the person and transaction are linked
    pub fn is_linked(&self, person: &str, transaction: &str) -> BudgeeResult<bool> {
        let pid = self.person_id(person)?;
        let tid = self.transaction_id(transaction)?;
        Ok(self.linked_transaction_ids(&pid).contains(&tid))
    }

    pub(crate) fn person_by_id(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub(crate) fn transaction_by_id(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub(crate) fn linked_transaction_ids(&self, id: &PersonId) -> &[TransactionId] {
        self.person_links.get(id).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn linked_person_ids(&self, id: &TransactionId) -> &[PersonId] {
        self.transaction_links.get(id).map_or(&[], Vec::as_slice)
    }

    // ---- creation ----

    /// Register a new person with no transactions
    pub fn create_person(&mut self, name: &str) -> BudgeeResult<&Person> {
        let person = Person::new(name);
        person
            .validate()
            .map_err(|e| BudgeeError::Validation(e.to_string()))?;
        self.assert_person_absent(name)?;

        let id = person.id();
        self.person_links.insert(id.clone(), Vec::new());
        Ok(&*self.people.entry(id).or_insert(person))
    }

    /// Register a new income or expense with nobody allocated yet
    ///
    /// The value sign is canonicalized for `kind`.
    pub fn create_transaction(
        &mut self,
        kind: TransactionKind,
        name: &str,
        value: Money,
        category: Option<Category>,
    ) -> BudgeeResult<&Transaction> {
        let transaction = Transaction::new(kind, name, value, category);
        transaction
            .validate()
            .map_err(|e| BudgeeError::Validation(e.to_string()))?;
        self.assert_transaction_absent(name)?;

        let id = transaction.id();
        self.transaction_links.insert(id.clone(), Vec::new());
        Ok(&*self.transactions.entry(id).or_insert(transaction))
    }

    // ---- deletion ----

    /// Remove a person and strip them from every transaction they shared
    pub fn delete_person(&mut self, name: &str) -> BudgeeResult<Person> {
        let id = self.person_id(name)?;
        let links = self.person_links.remove(&id).unwrap_or_default();

        for tid in &links {
            if let Some(people) = self.transaction_links.get_mut(tid) {
                people.retain(|pid| *pid != id);
            }
        }

        self.people
            .remove(&id)
            .ok_or_else(|| BudgeeError::person_not_found(name))
    }

    /// Remove a transaction and strip it from every person sharing it
    pub fn delete_transaction(&mut self, name: &str) -> BudgeeResult<Transaction> {
        let id = self.transaction_id(name)?;
        let links = self.transaction_links.remove(&id).unwrap_or_default();

        for pid in &links {
            if let Some(transactions) = self.person_links.get_mut(pid) {
                transactions.retain(|tid| *tid != id);
            }
        }

        self.transactions
            .remove(&id)
            .ok_or_else(|| BudgeeError::transaction_not_found(name))
    }

    // ---- rename ----

    /// Rename a person, re-keying them and every reverse reference
    pub fn rename_person(&mut self, name: &str, new_name: &str) -> BudgeeResult<&Person> {
        let old_id = self.person_id(name)?;
        let renamed = Person::new(new_name);
        renamed
            .validate()
            .map_err(|e| BudgeeError::Validation(e.to_string()))?;
        let new_id = renamed.id();
        if new_id != old_id {
            self.assert_person_absent(new_name)?;
        }

        self.people.remove(&old_id);
        let links = self.person_links.remove(&old_id).unwrap_or_default();

        for tid in &links {
            if let Some(people) = self.transaction_links.get_mut(tid) {
                for pid in people.iter_mut().filter(|pid| **pid == old_id) {
                    *pid = new_id.clone();
                }
            }
        }

        self.person_links.insert(new_id.clone(), links);
        Ok(&*self.people.entry(new_id).or_insert(renamed))
    }

    /// Rename a transaction, re-keying it and every reverse reference
    pub fn rename_transaction(
        &mut self,
        name: &str,
        new_name: &str,
    ) -> BudgeeResult<&Transaction> {
        let old_id = self.transaction_id(name)?;
        let new_id = TransactionId::from_name(new_name);
        if new_id.is_empty() {
            return Err(BudgeeError::Validation(format!(
                "Transaction name must contain at least one letter or digit (got {:?})",
                new_name
            )));
        }
        if new_id != old_id {
            self.assert_transaction_absent(new_name)?;
        }

        let mut transaction = self
            .transactions
            .remove(&old_id)
            .ok_or_else(|| BudgeeError::transaction_not_found(name))?;
        transaction.name = new_name.to_string();
        let links = self.transaction_links.remove(&old_id).unwrap_or_default();

        for pid in &links {
            if let Some(transactions) = self.person_links.get_mut(pid) {
                for tid in transactions.iter_mut().filter(|tid| **tid == old_id) {
                    *tid = new_id.clone();
                }
            }
        }

        self.transaction_links.insert(new_id.clone(), links);
        Ok(&*self.transactions.entry(new_id).or_insert(transaction))
    }

    // ---- field updates ----

    /// Replace a transaction's value; the sign is re-canonicalized for its kind
    pub fn update_transaction_value(
        &mut self,
        name: &str,
        value: Money,
    ) -> BudgeeResult<&Transaction> {
        let transaction = self
            .transactions
            .get_mut(&TransactionId::from_name(name))
            .ok_or_else(|| BudgeeError::transaction_not_found(name))?;
        transaction.set_value(value);
        Ok(&*transaction)
    }

    /// Replace a transaction's category; `None` clears it
    pub fn update_transaction_category(
        &mut self,
        name: &str,
        category: Option<Category>,
    ) -> BudgeeResult<&Transaction> {
        let transaction = self
            .transactions
            .get_mut(&TransactionId::from_name(name))
            .ok_or_else(|| BudgeeError::transaction_not_found(name))?;
        transaction.category = category;
        Ok(&*transaction)
    }

    // ---- associations ----

    /// Allocate a transaction to a person
    ///
    /// Returns `false` if they were already linked.
    pub fn link(&mut self, person: &str, transaction: &str) -> BudgeeResult<bool> {
        let pid = self.person_id(person)?;
        let tid = self.transaction_id(transaction)?;
        if self.linked_transaction_ids(&pid).contains(&tid) {
            return Ok(false);
        }

        self.person_links.entry(pid.clone()).or_default().push(tid.clone());
        self.transaction_links.entry(tid).or_default().push(pid);
        Ok(true)
    }

    /// Remove a person from a transaction
    ///
    /// Returns `false` if they were not linked.
    pub fn unlink(&mut self, person: &str, transaction: &str) -> BudgeeResult<bool> {
        let pid = self.person_id(person)?;
        let tid = self.transaction_id(transaction)?;
        if !self.linked_transaction_ids(&pid).contains(&tid) {
            return Ok(false);
        }

        if let Some(transactions) = self.person_links.get_mut(&pid) {
            transactions.retain(|id| *id != tid);
        }
        if let Some(people) = self.transaction_links.get_mut(&tid) {
            people.retain(|id| *id != pid);
        }
        Ok(true)
    }

    /// Install both association indexes wholesale while rebuilding from a
    /// snapshot. Both maps must cover exactly the ledger's entities and
    /// mirror each other; anything else is rejected without mutating.
    pub(crate) fn restore_links(
        &mut self,
        person_links: BTreeMap<PersonId, Vec<TransactionId>>,
        transaction_links: BTreeMap<TransactionId, Vec<PersonId>>,
    ) -> BudgeeResult<()> {
        for (pid, tids) in &person_links {
            let person = self.people.get(pid).ok_or_else(|| {
                BudgeeError::MalformedSnapshot(format!("links for unknown person '{}'", pid))
            })?;
            for tid in tids {
                let mirrored = transaction_links
                    .get(tid)
                    .is_some_and(|pids| pids.contains(pid));
                if !mirrored {
                    return Err(BudgeeError::MalformedSnapshot(format!(
                        "person '{}' lists transaction '{}' but the transaction does not list them",
                        person.name, tid
                    )));
                }
            }
        }

        for (tid, pids) in &transaction_links {
            let transaction = self.transactions.get(tid).ok_or_else(|| {
                BudgeeError::MalformedSnapshot(format!("links for unknown transaction '{}'", tid))
            })?;
            for pid in pids {
                let mirrored = person_links
                    .get(pid)
                    .is_some_and(|tids| tids.contains(tid));
                if !mirrored {
                    return Err(BudgeeError::MalformedSnapshot(format!(
                        "transaction '{}' lists person '{}' but the person does not list it",
                        transaction.name, pid
                    )));
                }
            }
        }

        for pid in self.people.keys() {
            self.person_links
                .insert(pid.clone(), person_links.get(pid).cloned().unwrap_or_default());
        }
        for tid in self.transactions.keys() {
            self.transaction_links.insert(
                tid.clone(),
                transaction_links.get(tid).cloned().unwrap_or_default(),
            );
        }
        Ok(())
    }
}
