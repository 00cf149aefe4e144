//! Whole-ledger summary report

use super::report::banner;
use crate::ledger::Ledger;
use crate::models::Transaction;

/// Format everyone, every income and every expense in the ledger
pub fn format_summary(ledger: &Ledger, symbol: &str) -> String {
    let mut output = banner("Summary");

    if ledger.is_empty() {
        output.push_str("Nothing recorded yet.\n");
        return output;
    }

    if ledger.person_count() > 0 {
        output.push_str(&format!("People ({}):\n", ledger.person_count()));
        for person in ledger.people() {
            output.push_str(&format!("    • {}\n", person.name));
        }
    }

    let incomes: Vec<&Transaction> = ledger.incomes().collect();
    if !incomes.is_empty() {
        output.push_str(&format!("Incomes ({}):\n", incomes.len()));
        for income in incomes {
            output.push_str(&format_line('+', income, ledger, symbol));
        }
    }

    let expenses: Vec<&Transaction> = ledger.expenses().collect();
    if !expenses.is_empty() {
        output.push_str(&format!("Expenses ({}):\n", expenses.len()));
        for expense in expenses {
            output.push_str(&format_line('-', expense, ledger, symbol));
        }
    }

    let unallocated: Vec<&str> = ledger.unallocated().map(|t| t.name.as_str()).collect();
    if !unallocated.is_empty() {
        output.push_str(&format!("Unallocated: {}\n", unallocated.join(", ")));
    }

    output
}

fn format_line(marker: char, transaction: &Transaction, ledger: &Ledger, symbol: &str) -> String {
    let mut line = format!(
        "    {} {}: {}",
        marker,
        transaction.name,
        transaction.value.format_with_symbol(symbol)
    );
    if let Some(category) = transaction.category {
        line.push_str(&format!(" [{}]", category));
    }
    let participants = ledger
        .participants(&transaction.name)
        .map_or(0, |people| people.len());
    if participants > 1 {
        line.push_str(&format!(" (split {} ways)", participants));
    }
    line.push('\n');
    line
}
