//! The narrow audit interface the engine needs from its log collaborator.
//!
//! The engine only appends; it never reads the log and never sees its
//! storage format.

use std::fmt;
use std::io;

/// Action tag attached to every audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreatedFolder,
    CopiedFile,
    RemovedFolder,
    RemovedFile,
    Error,
}

impl AuditAction {
    /// Stable wire tag for the action.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::CreatedFolder => "Created Folder",
            AuditAction::CopiedFile => "Copied File",
            AuditAction::RemovedFolder => "Removed Folder",
            AuditAction::RemovedFile => "Removed File",
            AuditAction::Error => "Error",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only sink for audit events, one record per sync outcome.
pub trait AuditSink {
    fn append(&mut self, action: AuditAction, detail: &str) -> io::Result<()>;
}

/// In-memory sink for tests and dry inspection.
impl AuditSink for Vec<(AuditAction, String)> {
    fn append(&mut self, action: AuditAction, detail: &str) -> io::Result<()> {
        self.push((action, detail.to_string()));
        Ok(())
    }
}
