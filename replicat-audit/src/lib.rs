//! # replicat-audit
//!
//! Append-only audit log for sync operations, stored as JSON lines with a
//! long-lived append handle. Implements the engine's [`AuditSink`] trait.
//!
//! [`AuditSink`]: replicat_engine::AuditSink

pub mod error;
pub mod log;

pub use error::AuditError;
pub use log::{read_records, AuditLog, AuditRecord};
