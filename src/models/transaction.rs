//! Transaction model
//!
//! Incomes and expenses share one shape and differ only by the sign their
//! value is held to. Every place that sets a value goes through
//! [`TransactionKind::canonicalize`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{normalize, TransactionId};
use super::money::Money;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned; value is never negative
    Income,
    /// Money spent; value is never positive
    Expense,
}

impl TransactionKind {
    /// Flip the sign of `value` if it points the wrong way for this kind
    pub fn canonicalize(&self, value: Money) -> Money {
        match self {
            Self::Income if value.is_negative() => -value,
            Self::Expense if value.is_positive() => -value,
            _ => value,
        }
    }

    /// Entity label used in messages and the audit log
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "income" | "incomes" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Error returned when a transaction kind cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown transaction kind '{}' (expected 'income' or 'expense')",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

/// Spending/earning category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Utility,
    Entertainment,
    Development,
    #[serde(rename = "Music Production")]
    MusicProduction,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Housing,
            Self::Utility,
            Self::Entertainment,
            Self::Development,
            Self::MusicProduction,
            Self::HealthFitness,
        ]
    }

    /// Get the display label for this category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Utility => "Utility",
            Self::Entertainment => "Entertainment",
            Self::Development => "Development",
            Self::MusicProduction => "Music Production",
            Self::HealthFitness => "Health & Fitness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts any spelling that normalizes like a label, e.g. "health-fitness"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize(c.label()) == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Error returned when a category name is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Category::all().iter().map(|c| c.label()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseCategoryError {}

/// An income or expense that can be shared between people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Income or expense
    pub kind: TransactionKind,

    /// Display name
    pub name: String,

    /// Signed value, canonicalized for `kind`
    pub value: Money,

    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Transaction {
    /// Create a new transaction, canonicalizing the value sign for `kind`
    pub fn new(
        kind: TransactionKind,
        name: impl Into<String>,
        value: Money,
        category: Option<Category>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            value: kind.canonicalize(value),
            category,
        }
    }

    /// Create a new income
    pub fn income(name: impl Into<String>, value: Money) -> Self {
        Self::new(TransactionKind::Income, name, value, None)
    }

    /// Create a new expense
    pub fn expense(name: impl Into<String>, value: Money) -> Self {
        Self::new(TransactionKind::Expense, name, value, None)
    }

    /// Get the name-derived identifier
    pub fn id(&self) -> TransactionId {
        TransactionId::from_name(&self.name)
    }

    /// Replace the value, keeping the sign canonical
    pub fn set_value(&mut self, value: Money) {
        self.value = self.kind.canonicalize(value);
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.id().is_empty() {
            return Err(TransactionValidationError::EmptyName(self.name.clone()));
        }
        if self.kind.canonicalize(self.value) != self.value {
            return Err(TransactionValidationError::WrongSign(self.kind));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyName(String),
    WrongSign(TransactionKind),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName(name) => write!(
                f,
                "Transaction name must contain at least one letter or digit (got {:?})",
                name
            ),
            Self::WrongSign(kind) => write!(f, "{} value has the wrong sign", kind),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
