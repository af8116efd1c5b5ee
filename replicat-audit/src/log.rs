//! Durable append-only audit log, one JSON record per line.
//!
//! The file handle is opened once and kept for the life of the process;
//! every append is a single serialized line followed by a flush, so records
//! survive an abrupt process kill and the file is never rewritten.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use replicat_engine::{AuditAction, AuditSink};

use crate::error::{io_err, AuditError};

/// One audit record. Records are append-only; the total order is emission
/// order and nothing ever mutates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub detail: String,
}

/// Long-lived append handle to the audit log file.
pub struct AuditLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Open (creating if needed) the audit log at `path` for appending.
    ///
    /// Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| io_err(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Path this log writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record stamped with the current time and flush it to disk.
    pub fn record(&mut self, action: AuditAction, detail: &str) -> Result<(), AuditError> {
        let record = AuditRecord {
            timestamp: Utc::now(),
            action: action.as_str().to_string(),
            detail: detail.to_string(),
        };
        let line = serde_json::to_string(&record)?;
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .map_err(|e| io_err(&self.path, e))
    }
}

impl AuditSink for AuditLog {
    fn append(&mut self, action: AuditAction, detail: &str) -> io::Result<()> {
        self.record(action, detail).map_err(io::Error::other)
    }
}

/// Read every record from an audit log file, in emission order.
///
/// Tooling and tests only — the engine never reads the log.
pub fn read_records(path: &Path) -> Result<Vec<AuditRecord>, AuditError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| io_err(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
