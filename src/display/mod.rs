//! Display formatting for terminal output
//!
//! Turns ledger state into the plain-text reports printed by the CLI.

pub mod person;
pub mod report;
pub mod summary;
pub mod transaction;

pub use person::{format_person_details, format_person_list};
pub use summary::format_summary;
pub use transaction::{format_transaction_details, format_transaction_list};
