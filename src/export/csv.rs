//! CSV export of who pays or earns what
//!
//! One row per person/transaction allocation, plus one row with an empty
//! person column for every transaction nobody is linked to yet.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgeeError, BudgeeResult};
use crate::ledger::Ledger;
use crate::models::Money;

#[derive(Debug, Serialize)]
struct AllocationRow<'a> {
    #[serde(rename = "Person")]
    person: &'a str,
    #[serde(rename = "Transaction")]
    transaction: &'a str,
    #[serde(rename = "Kind")]
    kind: &'static str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Participants")]
    participants: usize,
    #[serde(rename = "Share")]
    share: String,
}

/// Write the allocation report; returns the number of data rows
pub fn export_allocations_csv<W: Write>(ledger: &Ledger, writer: W) -> BudgeeResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for person in ledger.people() {
        let summary = ledger.person_summary(&person.name)?;
        for line in summary.incomes.iter().chain(&summary.expenses) {
            csv_writer
                .serialize(AllocationRow {
                    person: &person.name,
                    transaction: &line.name,
                    kind: line.kind.label(),
                    category: line.category.map_or("", |c| c.label()),
                    value: format_amount(line.value),
                    participants: line.participants,
                    share: format_amount(line.share),
                })
                .map_err(|e| BudgeeError::Export(e.to_string()))?;
            rows += 1;
        }
    }

    for transaction in ledger.unallocated() {
        csv_writer
            .serialize(AllocationRow {
                person: "",
                transaction: &transaction.name,
                kind: transaction.kind.label(),
                category: transaction.category.map_or("", |c| c.label()),
                value: format_amount(transaction.value),
                participants: 0,
                share: String::new(),
            })
            .map_err(|e| BudgeeError::Export(e.to_string()))?;
        rows += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgeeError::Export(e.to_string()))?;

    Ok(rows)
}

fn format_amount(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};

    #[test]
    fn test_export_allocations() {
        let mut ledger = Ledger::new();
        ledger.create_person("Alice").unwrap();
        ledger.create_person("Bob").unwrap();
        ledger
            .create_transaction(
                TransactionKind::Expense,
                "Rent, flat 2",
                Money::from_units(1000),
                Some(Category::Housing),
            )
            .unwrap();
        ledger
            .create_transaction(TransactionKind::Income, "Bonus", Money::from_cents(12345), None)
            .unwrap();
        ledger.link("Alice", "Rent, flat 2").unwrap();
        ledger.link("Bob", "Rent, flat 2").unwrap();

        let mut output = Vec::new();
        let rows = export_allocations_csv(&ledger, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(rows, 3);
        assert_eq!(
            lines[0],
            "Person,Transaction,Kind,Category,Value,Participants,Share"
        );
        assert_eq!(
            lines[1],
            "Alice,\"Rent, flat 2\",Expense,Housing,-1000.00,2,-500.00"
        );
        assert!(lines[2].starts_with("Bob,"));
        assert_eq!(lines[3], ",Bonus,Income,,123.45,0,");
    }

    #[test]
    fn test_export_empty_ledger() {
        let mut output = Vec::new();
        let rows = export_allocations_csv(&Ledger::new(), &mut output).unwrap();
        assert_eq!(rows, 0);
    }
}
