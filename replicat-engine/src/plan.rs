//! Diff planning — compute the minimal operation sequence that makes the
//! replica an exact mirror of the source.
//!
//! ## Pass order
//!
//! 1. Create the replica root if it does not exist yet.
//! 2. Top-down source pass: missing directories, then missing or changed
//!    files. Fingerprints are only computed when both sides have the file;
//!    an existence check is cheaper and sufficient otherwise.
//! 3. Bottom-up replica pass: stale files, and one removal per *top-level*
//!    stale directory (the whole subtree goes as a single logical
//!    operation, which keeps the audit log coherent).
//!
//! Creations always precede removals, so a file that moved inside the tree
//! is copied to its new location before the old one is pruned.

use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::fingerprint::fingerprint_file;
use crate::walk::{self, EntryKind};

/// A single filesystem mutation to apply to the replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    CreateDir { dest: PathBuf },
    CopyFile { source: PathBuf, dest: PathBuf },
    RemoveFile { dest: PathBuf },
    RemoveDir { dest: PathBuf },
}

/// What to do when the source root is missing at planning time.
///
/// The original behavior of tools in this family is to treat a vanished
/// source as an empty tree and wipe the replica. That is almost never what
/// an operator wants after, say, an unmounted network share, so the default
/// is to fail the cycle and retry on the next interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSourcePolicy {
    /// Abort the cycle with [`EngineError::SourceMissing`].
    #[default]
    Fail,
    /// Treat the source as empty; every replica entry becomes stale.
    PurgeReplica,
}

/// Planner knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub missing_source: MissingSourcePolicy,
}

/// A per-path problem encountered while planning (e.g. a file that could
/// not be fingerprinted). The cycle continues; the issue is surfaced as an
/// `Error` audit record.
#[derive(Debug)]
pub struct PlanIssue {
    pub path: PathBuf,
    pub error: EngineError,
}

/// Ordered operation sequence for one sync cycle.
#[derive(Debug, Default)]
pub struct Plan {
    pub ops: Vec<SyncOp>,
    pub issues: Vec<PlanIssue>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.issues.is_empty()
    }
}

/// Compare the live source and replica trees and produce the operations
/// needed to converge the replica.
///
/// Enumeration failures abort planning; per-file read failures are demoted
/// to [`PlanIssue`]s and planning continues.
pub fn plan(
    source_root: &Path,
    replica_root: &Path,
    options: PlanOptions,
) -> Result<Plan, EngineError> {
    if !source_root.is_dir() {
        match options.missing_source {
            MissingSourcePolicy::Fail => {
                return Err(EngineError::SourceMissing {
                    path: source_root.to_path_buf(),
                })
            }
            MissingSourcePolicy::PurgeReplica => {
                tracing::warn!(
                    "source root {} is missing; purging replica per policy",
                    source_root.display()
                );
            }
        }
    }

    let mut plan = Plan::default();

    if !replica_root.exists() {
        plan.ops.push(SyncOp::CreateDir {
            dest: replica_root.to_path_buf(),
        });
    }

    // Source pass: creations and copies, parents before children.
    for entry in walk::top_down(source_root) {
        let entry = entry?;
        let source_path = source_root.join(&entry.rel);
        let replica_path = replica_root.join(&entry.rel);
        match entry.kind {
            EntryKind::Dir => {
                if !replica_path.exists() {
                    plan.ops.push(SyncOp::CreateDir { dest: replica_path });
                }
            }
            EntryKind::File => {
                if !replica_path.exists() {
                    plan.ops.push(SyncOp::CopyFile {
                        source: source_path,
                        dest: replica_path,
                    });
                    continue;
                }
                match content_differs(&source_path, &replica_path) {
                    Ok(true) => plan.ops.push(SyncOp::CopyFile {
                        source: source_path,
                        dest: replica_path,
                    }),
                    Ok(false) => {}
                    Err(error) => plan.issues.push(PlanIssue {
                        path: source_path,
                        error,
                    }),
                }
            }
        }
    }

    // Replica pass: removals, deepest entries first. A stale directory is
    // removed as one subtree rooted at its top-most stale ancestor, so
    // descendants of an already-stale directory get no operation of their
    // own.
    for entry in walk::bottom_up(replica_root) {
        let entry = entry?;
        if source_root.join(&entry.rel).exists() {
            continue;
        }
        if !parent_exists_in_source(source_root, &entry.rel) {
            continue;
        }
        let dest = replica_root.join(&entry.rel);
        match entry.kind {
            EntryKind::Dir => plan.ops.push(SyncOp::RemoveDir { dest }),
            EntryKind::File => plan.ops.push(SyncOp::RemoveFile { dest }),
        }
    }

    Ok(plan)
}

fn content_differs(source: &Path, replica: &Path) -> Result<bool, EngineError> {
    Ok(fingerprint_file(source)? != fingerprint_file(replica)?)
}

/// True when `rel`'s parent directory still exists under the source root —
/// i.e. `rel` is the top-most stale path on its branch.
fn parent_exists_in_source(source_root: &Path, rel: &Path) -> bool {
    match rel.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => source_root.join(parent).exists(),
        _ => true,
    }
}
