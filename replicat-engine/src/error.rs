//! Error types for replicat-engine.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed mid-walk (permission denied, etc.).
    ///
    /// This aborts the current cycle's plan; per-file read errors do not.
    #[error("failed to enumerate {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The source root is missing or not a directory and the configured
    /// policy is to fail rather than treat it as an empty tree.
    #[error("source root {path} is missing or not a directory")]
    SourceMissing { path: PathBuf },
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
