//! Transaction display formatting

use super::report::{banner, column_width, truncate};
use crate::models::Transaction;
use crate::services::TransactionDetails;

const NAME_COLUMN_MAX: usize = 30;

/// Format transactions as a table of name, kind, value and category
pub fn format_transaction_list(transactions: &[&Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let name_width = column_width(transactions.iter().map(|t| t.name.as_str()), 4)
        .min(NAME_COLUMN_MAX);

    let mut output = format!(
        "{:<name_width$}  {:<7}  {:>12}  {}\n",
        "Name",
        "Kind",
        "Value",
        "Category",
        name_width = name_width
    );
    output.push_str(&format!(
        "{:-<name_width$}  {:-<7}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        "",
        name_width = name_width
    ));

    for transaction in transactions {
        output.push_str(&format!(
            "{:<name_width$}  {:<7}  {:>12}  {}\n",
            truncate(&transaction.name, name_width),
            transaction.kind.label(),
            transaction.value.format_with_symbol(symbol),
            transaction.category.map_or("", |c| c.label()),
            name_width = name_width
        ));
    }

    output
}

/// Format one transaction with its participants
pub fn format_transaction_details(details: &TransactionDetails, symbol: &str) -> String {
    let transaction = &details.transaction;
    let mut output = banner(&transaction.name);

    output.push_str(&format!("Kind:         {}\n", transaction.kind.label()));
    output.push_str(&format!(
        "Value:        {}\n",
        transaction.value.format_with_symbol(symbol)
    ));
    if let Some(category) = transaction.category {
        output.push_str(&format!("Category:     {}\n", category));
    }

    match details.share {
        Some(share) => {
            output.push_str(&format!(
                "Participants: {}\n",
                details.participants.join(", ")
            ));
            output.push_str(&format!(
                "Share:        {}\n",
                share.format_with_symbol(symbol)
            ));
        }
        None => output.push_str("Participants: (unallocated)\n"),
    }

    output
}
