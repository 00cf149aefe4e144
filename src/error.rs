//! Custom error types for Budgee
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Budgee operations
#[derive(Error, Debug)]
pub enum BudgeeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup by name failed
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Creation or rename collides with an existing normalized id
    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: &'static str,
        identifier: String,
    },

    /// Share requested on a transaction nobody is associated with
    #[error("Transaction is unallocated: {0}")]
    Unallocated(String),

    /// A snapshot references a name that was never defined
    #[error("{referenced_by} references unknown {entity_type}: {identifier}")]
    DanglingReference {
        entity_type: &'static str,
        identifier: String,
        referenced_by: String,
    },

    /// Persisted data is structurally invalid
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgeeError {
    /// Create a "not found" error for people
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create an "already exists" error for people
    pub fn person_exists(identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create an "already exists" error for transactions
    pub fn transaction_exists(identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an "already exists" error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgeeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgeeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Budgee operations
pub type BudgeeResult<T> = Result<T, BudgeeError>;
