//! Transaction CLI commands
//!
//! Implements CLI commands for incomes and expenses.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{BudgeeError, BudgeeResult};
use crate::models::{Category, Money, ParseCategoryError, ParseKindError, TransactionKind};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new income or expense
    Add {
        /// "income" or "expense"
        kind: String,
        /// Transaction name
        name: String,
        /// Amount (e.g., "1000", "45.50"); the sign is set by the kind
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (e.g., "Housing", "Health & Fitness")
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Remove a transaction and all of its allocations
    #[command(alias = "rm")]
    Remove {
        /// Transaction name
        name: String,
    },
    /// Rename a transaction
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Change a transaction's amount
    SetValue {
        /// Transaction name
        name: String,
        /// New amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Set or clear a transaction's category
    SetCategory {
        /// Transaction name
        name: String,
        /// New category
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear: bool,
    },
    /// Show a transaction and who shares it
    Show {
        /// Transaction name
        name: String,
    },
    /// List transactions
    #[command(alias = "ls")]
    List {
        /// Only show "income" or "expense" transactions
        #[arg(short, long)]
        kind: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgeeResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let mut service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            name,
            amount,
            category,
        } => {
            let kind = parse_kind(&kind)?;
            let value = parse_amount(&amount)?;
            let category = category.as_deref().map(parse_category).transpose()?;

            let transaction = service.create(kind, &name, value, category)?;
            println!("Added {}: {}", kind.label().to_lowercase(), transaction.name);
            println!("  Value: {}", transaction.value.format_with_symbol(symbol));
            if let Some(category) = transaction.category {
                println!("  Category: {}", category);
            }
            println!("  ID: {}", transaction.id());
        }

        TransactionCommands::Remove { name } => {
            let transaction = service.delete(&name)?;
            println!(
                "Removed {}: {}",
                transaction.kind.label().to_lowercase(),
                transaction.name
            );
        }

        TransactionCommands::Rename { name, new_name } => {
            let transaction = service.rename(&name, &new_name)?;
            println!("Renamed '{}' to '{}'", name, transaction.name);
        }

        TransactionCommands::SetValue { name, amount } => {
            let transaction = service.set_value(&name, parse_amount(&amount)?)?;
            println!(
                "{} is now {}",
                transaction.name,
                transaction.value.format_with_symbol(symbol)
            );
        }

        TransactionCommands::SetCategory {
            name,
            category,
            clear,
        } => {
            let category = if clear {
                None
            } else {
                category.as_deref().map(parse_category).transpose()?
            };

            let transaction = service.set_category(&name, category)?;
            match transaction.category {
                Some(category) => println!("{} is now in {}", transaction.name, category),
                None => println!("Cleared category of {}", transaction.name),
            }
        }

        TransactionCommands::Show { name } => {
            let details = service.details(&name)?;
            print!("{}", format_transaction_details(&details, symbol));
        }

        TransactionCommands::List { kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            print!("{}", format_transaction_list(&service.list(kind), symbol));
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> BudgeeResult<TransactionKind> {
    s.parse()
        .map_err(|e: ParseKindError| BudgeeError::Validation(e.to_string()))
}

fn parse_category(s: &str) -> BudgeeResult<Category> {
    s.parse()
        .map_err(|e: ParseCategoryError| BudgeeError::Validation(e.to_string()))
}

fn parse_amount(s: &str) -> BudgeeResult<Money> {
    Money::parse(s).map_err(|e| {
        BudgeeError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1000' or '45.50'. Error: {}",
            s, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_kind("Expenses").unwrap(), TransactionKind::Expense);
        assert!(parse_kind("transfer").unwrap_err().is_validation());

        assert_eq!(
            parse_category("health & fitness").unwrap(),
            Category::HealthFitness
        );
        assert!(parse_category("Groceries").unwrap_err().is_validation());

        assert_eq!(parse_amount("45.50").unwrap(), Money::from_cents(4550));
        assert_eq!(parse_amount("-10").unwrap(), Money::from_units(-10));
        assert!(parse_amount("ten").unwrap_err().is_validation());

        let err = parse_amount("99999999999999999").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("out of range"));
    }
}
