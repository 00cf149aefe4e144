//! Core data models for Budgee
//!
//! This module contains the data structures that represent the budgeting
//! domain: people, incomes, expenses, categories and money amounts.

pub mod ids;
pub mod money;
pub mod person;
pub mod transaction;

pub use ids::{normalize, PersonId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use person::Person;
pub use transaction::{
    Category, ParseCategoryError, ParseKindError, Transaction, TransactionKind,
};
