//! Share and per-person totals
//!
//! A transaction's share is its value split evenly between everyone linked
//! to it. Per-person totals are sums of shares; "shared" totals only count
//! transactions that are split between more than one person.

use serde::Serialize;

use super::Ledger;
use crate::error::{BudgeeError, BudgeeResult};
use crate::models::{Category, Money, PersonId, Transaction, TransactionId, TransactionKind};

/// One transaction as seen from a single person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionShare {
    pub name: String,
    pub kind: TransactionKind,
    pub category: Option<Category>,
    /// Full transaction value
    pub value: Money,
    /// Number of people the value is split between
    pub participants: usize,
    /// This person's portion of `value`
    pub share: Money,
}

impl TransactionShare {
    pub fn is_shared(&self) -> bool {
        self.participants > 1
    }
}

/// Everything the per-person report shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    pub name: String,
    pub incomes: Vec<TransactionShare>,
    pub expenses: Vec<TransactionShare>,
    pub total_incomes: Money,
    pub total_expenses: Money,
    pub profits: Money,
    pub total_shared_incomes: Money,
    pub total_shared_expenses: Money,
}

impl Ledger {
    /// One person's portion of a transaction
    ///
    /// Fails with `Unallocated` when nobody is linked to it.
    pub fn share(&self, transaction: &str) -> BudgeeResult<Money> {
        let id = TransactionId::from_name(transaction);
        if !self.transactions.contains_key(&id) {
            return Err(BudgeeError::transaction_not_found(transaction));
        }
        self.share_of(&id)
    }

    fn share_of(&self, id: &TransactionId) -> BudgeeResult<Money> {
        let transaction = self
            .transactions
            .get(id)
            .ok_or_else(|| BudgeeError::transaction_not_found(id.as_str()))?;
        transaction
            .value
            .checked_split(self.linked_person_ids(id).len())
            .ok_or_else(|| BudgeeError::Unallocated(transaction.name.clone()))
    }

    /// Sum of shares over a person's transactions of one kind
    fn sum_shares(
        &self,
        person: &str,
        kind: TransactionKind,
        shared_only: bool,
    ) -> BudgeeResult<Money> {
        let pid = self.person_id(person)?;
        let mut total = Money::zero();

        for tid in self.linked_transaction_ids(&pid) {
            let Some(transaction) = self.transactions.get(tid) else {
                continue;
            };
            if transaction.kind != kind {
                continue;
            }
            if shared_only && self.linked_person_ids(tid).len() <= 1 {
                continue;
            }
            total = total
                .checked_add(self.share_of(tid)?)
                .ok_or_else(|| total_overflow(person))?;
        }

        Ok(total)
    }

    /// Sum of the person's income shares
    pub fn person_total_incomes(&self, person: &str) -> BudgeeResult<Money> {
        self.sum_shares(person, TransactionKind::Income, false)
    }

    /// Sum of the person's expense shares
    ///
    /// Expense values are stored negative, so this total is zero or
    /// negative. Use its magnitude when reporting how much was spent.
    pub fn person_total_expenses(&self, person: &str) -> BudgeeResult<Money> {
        self.sum_shares(person, TransactionKind::Expense, false)
    }

    /// Income shares minus the magnitude of expense shares
    ///
    /// Because [`person_total_expenses`](Self::person_total_expenses) is
    /// already signed, this equals `total_incomes + total_expenses`. An
    /// income of 100 against an expense share of -40 gives 60.
    pub fn person_profits(&self, person: &str) -> BudgeeResult<Money> {
        let incomes = self.person_total_incomes(person)?;
        let expenses = self.person_total_expenses(person)?;
        profits(person, incomes, expenses)
    }

    /// Sum of the person's income shares split with at least one other person
    pub fn person_total_shared_incomes(&self, person: &str) -> BudgeeResult<Money> {
        self.sum_shares(person, TransactionKind::Income, true)
    }

    /// Sum of the person's expense shares split with at least one other person
    pub fn person_total_shared_expenses(&self, person: &str) -> BudgeeResult<Money> {
        self.sum_shares(person, TransactionKind::Expense, true)
    }

    /// Build the per-person report
    pub fn person_summary(&self, person: &str) -> BudgeeResult<PersonSummary> {
        let pid = self.person_id(person)?;
        let (incomes, expenses) = self.shares_for(&pid)?;

        let total_incomes = self.person_total_incomes(person)?;
        let total_expenses = self.person_total_expenses(person)?;

        Ok(PersonSummary {
            name: self.find_person(person)?.name.clone(),
            incomes,
            expenses,
            total_incomes,
            total_expenses,
            profits: profits(person, total_incomes, total_expenses)?,
            total_shared_incomes: self.person_total_shared_incomes(person)?,
            total_shared_expenses: self.person_total_shared_expenses(person)?,
        })
    }

    fn shares_for(
        &self,
        pid: &PersonId,
    ) -> BudgeeResult<(Vec<TransactionShare>, Vec<TransactionShare>)> {
        let mut incomes = Vec::new();
        let mut expenses = Vec::new();

        for tid in self.linked_transaction_ids(pid) {
            let Some(transaction) = self.transactions.get(tid) else {
                continue;
            };
            let line = TransactionShare {
                name: transaction.name.clone(),
                kind: transaction.kind,
                category: transaction.category,
                value: transaction.value,
                participants: self.linked_person_ids(tid).len(),
                share: self.share_of(tid)?,
            };
            match transaction.kind {
                TransactionKind::Income => incomes.push(line),
                TransactionKind::Expense => expenses.push(line),
            }
        }

        Ok((incomes, expenses))
    }

    /// Transactions nobody has been linked to yet
    pub fn unallocated(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|(id, _)| self.linked_person_ids(id).is_empty())
            .map(|(_, t)| t)
    }
}

fn profits(person: &str, incomes: Money, expenses: Money) -> BudgeeResult<Money> {
    incomes
        .checked_add(expenses)
        .ok_or_else(|| total_overflow(person))
}

fn total_overflow(person: &str) -> BudgeeError {
    BudgeeError::Validation(format!("Totals for '{}' are too large to compute", person))
}
