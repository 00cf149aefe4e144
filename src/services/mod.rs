//! Service layer for Budgee
//!
//! Services wrap ledger operations on an open `Storage`, saving the
//! snapshot after each successful mutation and recording it in the audit
//! log.

pub mod person;
pub mod transaction;

pub use person::PersonService;
pub use transaction::{TransactionDetails, TransactionService};
