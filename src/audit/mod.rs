//! Audit log of ledger mutations
//!
//! Every create, update and delete performed through the services is
//! appended to a line-delimited JSON file (JSONL) together with the
//! serialized entity before and after the change.
//!
//! - `AuditEntry`: one logged operation with timestamp, entity type and id.
//! - `AuditLogger`: appends entries to the log file and reads them back,
//!   narrowed by a `HistoryFilter`.
//! - `generate_diff`: short summary of the fields an update changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use budgee::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Person,
//!     person.id().to_string(),
//!     Some(person.name.clone()),
//!     &person,
//! );
//! logger.append(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{association_id, AuditLogger, HistoryFilter};
