//! Person display formatting
//!
//! Formats people for terminal output in list and detail views.

use super::report::{banner, column_width, separator, REPORT_WIDTH};
use crate::ledger::{PersonSummary, TransactionShare};
use crate::models::Person;

/// Format a list of people, one per line
pub fn format_person_list(people: &[&Person]) -> String {
    if people.is_empty() {
        return "No people found.\n".to_string();
    }

    let mut output = String::new();
    for person in people {
        output.push_str(&format!("{:<24} {}\n", person.name, person.id()));
    }
    output
}

/// Format one person's shares and totals
pub fn format_person_details(summary: &PersonSummary, symbol: &str) -> String {
    let mut output = banner(&summary.name);

    output.push_str("Incomes:\n");
    push_shares(&mut output, '+', &summary.incomes, symbol);
    output.push_str("Expenses:\n");
    push_shares(&mut output, '-', &summary.expenses, symbol);

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    let totals = [
        ("Profits", summary.profits),
        ("Total Incomes", summary.total_incomes),
        ("Total Expenses", summary.total_expenses),
        ("Total Shared Incomes", summary.total_shared_incomes),
        ("Total Shared Expenses", summary.total_shared_expenses),
    ];
    let label_width = column_width(totals.iter().map(|(label, _)| *label), 0) + 1;
    for (label, amount) in totals {
        output.push_str(&format!(
            "{:<width$} {:>12}\n",
            format!("{}:", label),
            amount.format_with_symbol(symbol),
            width = label_width
        ));
    }

    output
}

fn push_shares(output: &mut String, marker: char, shares: &[TransactionShare], symbol: &str) {
    if shares.is_empty() {
        output.push_str("    (none)\n");
        return;
    }

    for share in shares {
        output.push_str(&format!(
            "    {} {}: {}",
            marker,
            share.name,
            share.share.format_with_symbol(symbol)
        ));
        if share.is_shared() {
            output.push_str(&format!(
                " of {} (split {} ways)",
                share.value.format_with_symbol(symbol),
                share.participants
            ));
        }
        output.push('\n');
    }
}
