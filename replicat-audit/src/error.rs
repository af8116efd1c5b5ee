//! Error types for replicat-audit.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from audit log operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("audit record JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`AuditError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AuditError {
    AuditError::Io {
        path: path.into(),
        source,
    }
}
