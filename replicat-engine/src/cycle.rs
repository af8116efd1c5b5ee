//! One full walk-diff-apply pass over the source and replica trees.

use std::path::Path;

use crate::audit::{AuditAction, AuditSink};
use crate::error::EngineError;
use crate::execute::{apply_plan, CycleStats};
use crate::plan::{plan, PlanOptions};

/// Outcome of one sync cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub stats: CycleStats,
    /// Per-path planning problems that were logged and skipped.
    pub plan_issues: usize,
}

impl CycleSummary {
    /// True when the cycle found the trees already converged.
    pub fn is_noop(&self) -> bool {
        self.stats.changes() == 0 && self.stats.errors == 0 && self.plan_issues == 0
    }
}

/// Run one sync cycle: plan fully, then execute fully.
///
/// Planning failures (enumeration errors, missing source under the default
/// policy) abort the cycle before any filesystem mutation. Per-operation
/// execution failures are logged and do not abort the remaining operations.
pub fn sync_cycle(
    source_root: &Path,
    replica_root: &Path,
    options: PlanOptions,
    sink: &mut dyn AuditSink,
) -> Result<CycleSummary, EngineError> {
    tracing::info!(
        "syncing {} -> {}",
        source_root.display(),
        replica_root.display()
    );

    let plan = plan(source_root, replica_root, options)?;

    for issue in &plan.issues {
        tracing::warn!("skipped {}: {}", issue.path.display(), issue.error);
        if let Err(err) = sink.append(AuditAction::Error, &issue.error.to_string()) {
            tracing::warn!("failed to append audit record: {err}");
        }
    }

    let stats = apply_plan(&plan.ops, sink);
    let summary = CycleSummary {
        stats,
        plan_issues: plan.issues.len(),
    };

    if summary.is_noop() {
        tracing::info!("no changes detected");
    } else {
        tracing::info!(
            "cycle done: {} changes, {} errors",
            stats.changes(),
            stats.errors + summary.plan_issues,
        );
    }
    Ok(summary)
}
