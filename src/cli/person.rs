//! Person CLI commands
//!
//! Implements CLI commands for people and their allocations.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::person::{format_person_details, format_person_list};
use crate::error::BudgeeResult;
use crate::services::PersonService;
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a new person
    Add {
        /// Person name
        name: String,
    },
    /// Remove a person and all of their allocations
    #[command(alias = "rm")]
    Remove {
        /// Person name
        name: String,
    },
    /// Rename a person
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Show a person's shares and totals
    Show {
        /// Person name
        name: String,
    },
    /// List all people
    #[command(alias = "ls")]
    List,
    /// Allocate a transaction to a person
    Link {
        /// Person name
        person: String,
        /// Income or expense name
        transaction: String,
    },
    /// Remove a person from a transaction
    Unlink {
        /// Person name
        person: String,
        /// Income or expense name
        transaction: String,
    },
}

/// Handle a person command
pub fn handle_person_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: PersonCommands,
) -> BudgeeResult<()> {
    let mut service = PersonService::new(storage);

    match cmd {
        PersonCommands::Add { name } => {
            let person = service.create(&name)?;
            println!("Added person: {}", person.name);
            println!("  ID: {}", person.id());
        }

        PersonCommands::Remove { name } => {
            let person = service.delete(&name)?;
            println!("Removed person: {}", person.name);
        }

        PersonCommands::Rename { name, new_name } => {
            let person = service.rename(&name, &new_name)?;
            println!("Renamed '{}' to '{}'", name, person.name);
        }

        PersonCommands::Show { name } => {
            let summary = service.summary(&name)?;
            print!(
                "{}",
                format_person_details(&summary, &settings.currency_symbol)
            );
        }

        PersonCommands::List => {
            print!("{}", format_person_list(&service.list()));
        }

        PersonCommands::Link {
            person,
            transaction,
        } => {
            if service.link(&person, &transaction)? {
                println!("Linked '{}' to '{}'", person, transaction);
            } else {
                println!("'{}' is already linked to '{}'", person, transaction);
            }
        }

        PersonCommands::Unlink {
            person,
            transaction,
        } => {
            if service.unlink(&person, &transaction)? {
                println!("Unlinked '{}' from '{}'", person, transaction);
            } else {
                println!("'{}' is not linked to '{}'", person, transaction);
            }
        }
    }

    Ok(())
}
