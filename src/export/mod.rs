//! Export module for Budgee
//!
//! - CSV: one row per allocation (spreadsheet-compatible)
//! - JSON: snapshot with export metadata, loadable as a context file
//! - YAML: the same export, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_allocations_csv;
pub use json::{export_snapshot_json, SnapshotExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_snapshot_yaml, import_snapshot_yaml};
