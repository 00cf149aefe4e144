//! Person model
//!
//! A person is anyone who can share incomes and expenses. The identifier is
//! derived from the name, so a person only stores what the user typed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;

/// Someone transactions can be allocated to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name
    pub name: String,
}

impl Person {
    /// Create a new person
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the name-derived identifier
    pub fn id(&self) -> PersonId {
        PersonId::from_name(&self.name)
    }

    /// Validate the person
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id().is_empty() {
            return Err(PersonValidationError::EmptyName(self.name.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for people
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName(String),
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName(name) => write!(
                f,
                "Person name must contain at least one letter or digit (got {:?})",
                name
            ),
        }
    }
}

impl std::error::Error for PersonValidationError {}
