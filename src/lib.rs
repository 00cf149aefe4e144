//! Budgee - track incomes and expenses shared between people
//!
//! A ledger holds people and transactions (incomes and expenses). Linking a
//! person to a transaction allocates it to them; a transaction's value is
//! split evenly between everyone linked to it, and per-person totals are
//! sums of those shares.
//!
//! # Architecture
//!
//! - `models`: people, transactions, categories, money and name-derived ids
//! - `ledger`: the in-memory ledger, its association indexes and aggregates
//! - `storage`: JSON snapshot persistence and the open-ledger handle
//! - `services`: mutations that save and audit
//! - `audit`: append-only log of every mutation
//! - `display`: terminal report formatting
//! - `export`: CSV, JSON and YAML exports
//! - `config`: data directory and settings
//! - `cli`: clap subcommands and their handlers
//! - `error`: the crate error type
//!
//! # Example
//!
//! ```rust,ignore
//! use budgee::ledger::Ledger;
//! use budgee::models::{Money, TransactionKind};
//!
//! let mut ledger = Ledger::new();
//! ledger.create_person("Alice")?;
//! ledger.create_person("Bob")?;
//! ledger.create_transaction(TransactionKind::Expense, "Rent", Money::from_units(1000), None)?;
//! ledger.link("Alice", "Rent")?;
//! ledger.link("Bob", "Rent")?;
//! assert_eq!(ledger.share("Rent")?, Money::from_units(-500));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgeeError, BudgeeResult};
