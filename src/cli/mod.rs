//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod history;
pub mod person;
pub mod transaction;

pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use person::{handle_person_command, PersonCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
