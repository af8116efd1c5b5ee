//! Operation execution — apply planned operations and report every outcome.
//!
//! Failure isolation is per-operation: one failed copy or removal is logged
//! and the rest of the plan is still attempted.

use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::audit::{AuditAction, AuditSink};
use crate::error::{io_err, EngineError};
use crate::plan::SyncOp;

/// Counters for one executed plan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub created_dirs: usize,
    pub copied_files: usize,
    pub removed_files: usize,
    pub removed_dirs: usize,
    pub errors: usize,
}

impl CycleStats {
    pub fn changes(&self) -> usize {
        self.created_dirs + self.copied_files + self.removed_files + self.removed_dirs
    }
}

/// Apply a single operation, returning a human-readable description of what
/// was done.
pub fn apply(op: &SyncOp) -> Result<String, EngineError> {
    match op {
        SyncOp::CreateDir { dest } => {
            // Tolerates the directory already existing (race with external
            // mutation between plan and execute).
            fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;
            Ok(format!("Created: {}", dest.display()))
        }
        SyncOp::CopyFile { source, dest } => {
            fs::copy(source, dest).map_err(|e| io_err(dest, e))?;
            copy_mtime(source, dest);
            Ok(format!("Copied: {} -> {}", source.display(), dest.display()))
        }
        SyncOp::RemoveFile { dest } => {
            fs::remove_file(dest).map_err(|e| io_err(dest, e))?;
            Ok(format!("Deleted: {}", dest.display()))
        }
        SyncOp::RemoveDir { dest } => {
            fs::remove_dir_all(dest).map_err(|e| io_err(dest, e))?;
            Ok(format!("Deleted: {}", dest.display()))
        }
    }
}

/// Apply every operation in order, forwarding one audit record per outcome.
pub fn apply_plan(ops: &[SyncOp], sink: &mut dyn AuditSink) -> CycleStats {
    let mut stats = CycleStats::default();
    for op in ops {
        match apply(op) {
            Ok(detail) => {
                tracing::info!("{detail}");
                record(sink, success_action(op), &detail);
                count(&mut stats, op);
            }
            Err(err) => {
                tracing::warn!("operation failed: {err}");
                record(sink, AuditAction::Error, &err.to_string());
                stats.errors += 1;
            }
        }
    }
    stats
}

fn success_action(op: &SyncOp) -> AuditAction {
    match op {
        SyncOp::CreateDir { .. } => AuditAction::CreatedFolder,
        SyncOp::CopyFile { .. } => AuditAction::CopiedFile,
        SyncOp::RemoveFile { .. } => AuditAction::RemovedFile,
        SyncOp::RemoveDir { .. } => AuditAction::RemovedFolder,
    }
}

fn count(stats: &mut CycleStats, op: &SyncOp) {
    match op {
        SyncOp::CreateDir { .. } => stats.created_dirs += 1,
        SyncOp::CopyFile { .. } => stats.copied_files += 1,
        SyncOp::RemoveFile { .. } => stats.removed_files += 1,
        SyncOp::RemoveDir { .. } => stats.removed_dirs += 1,
    }
}

fn record(sink: &mut dyn AuditSink, action: AuditAction, detail: &str) {
    // A failing audit sink must not take the sync loop down with it.
    if let Err(err) = sink.append(action, detail) {
        tracing::warn!("failed to append audit record: {err}");
    }
}

fn copy_mtime(source: &Path, dest: &Path) {
    // Best effort only; content is what we guarantee.
    if let Ok(meta) = fs::metadata(source) {
        let mtime = FileTime::from_last_modification_time(&meta);
        if let Err(err) = filetime::set_file_mtime(dest, mtime) {
            tracing::debug!("could not set mtime on {}: {err}", dest.display());
        }
    }
}
