//! # replicat-engine
//!
//! One-way directory synchronization engine: walk the source and replica
//! trees, compute the minimal operation sequence to converge the replica,
//! apply it with per-operation failure isolation, and report every outcome
//! to an append-only audit sink.
//!
//! Call [`sync_cycle`] for one full walk-diff-apply pass. The engine keeps
//! no state between cycles; every cycle re-reads the live filesystem.

pub mod audit;
pub mod cycle;
pub mod error;
pub mod execute;
pub mod fingerprint;
pub mod plan;
pub mod walk;

pub use audit::{AuditAction, AuditSink};
pub use cycle::{sync_cycle, CycleSummary};
pub use error::EngineError;
pub use execute::CycleStats;
pub use fingerprint::{fingerprint_file, Fingerprint};
pub use plan::{MissingSourcePolicy, Plan, PlanOptions, SyncOp};
