//! Configuration module for Budgee
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgeePaths;
pub use settings::Settings;
