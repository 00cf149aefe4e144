//! Path management for Budgee
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGEE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `budgee` (e.g. `~/.config/budgee`
//!    on Linux, `%APPDATA%\budgee\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgeeError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "BUDGEE_DATA_DIR";

/// Manages all paths used by Budgee
#[derive(Debug, Clone)]
pub struct BudgeePaths {
    /// Base directory for all Budgee data
    base_dir: PathBuf,
}

impl BudgeePaths {
    /// Create a new BudgeePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgeeError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BudgeePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the default ledger snapshot
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgeeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgeeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgeeError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgeeError> {
    ProjectDirs::from("", "", "budgee")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BudgeeError::Config("Could not determine home directory".into()))
}
