//! replicat — one-way periodic folder synchronizer.
//!
//! # Usage
//!
//! ```text
//! replicat <source> <replica> <interval> <log> [--missing-source fail|purge]
//! ```
//!
//! Every `interval` seconds (measured from the end of the previous cycle),
//! the replica folder is made an exact content mirror of the source folder.
//! Every mutation is appended to the audit log at `log`. The process runs
//! until externally terminated; only malformed arguments or an unopenable
//! audit log stop it from starting.

mod scheduler;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use replicat_audit::AuditLog;
use replicat_engine::MissingSourcePolicy;
use scheduler::{LoopConfig, SystemClock};

#[derive(Parser, Debug)]
#[command(
    name = "replicat",
    version,
    about = "Keep a replica folder in sync with a source folder",
    long_about = None,
)]
struct Cli {
    /// Path to the source folder (the authoritative tree).
    source: PathBuf,

    /// Path to the replica folder kept in sync with the source.
    replica: PathBuf,

    /// Seconds to wait between the end of one cycle and the start of the next.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to the append-only audit log file.
    log: PathBuf,

    /// What to do when the source folder is missing at cycle time.
    #[arg(long, value_enum, default_value = "fail")]
    missing_source: MissingSourceArg,
}

/// Thin wrapper so clap can parse [`MissingSourcePolicy`] from CLI args.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissingSourceArg {
    /// Log an error, leave the replica untouched, retry next interval.
    Fail,
    /// Treat a missing source as empty and delete everything in the replica.
    Purge,
}

impl From<MissingSourceArg> for MissingSourcePolicy {
    fn from(arg: MissingSourceArg) -> Self {
        match arg {
            MissingSourceArg::Fail => MissingSourcePolicy::Fail,
            MissingSourceArg::Purge => MissingSourcePolicy::PurgeReplica,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let audit = AuditLog::open(&cli.log)
        .with_context(|| format!("cannot open audit log at {}", cli.log.display()))?;

    let config = LoopConfig {
        source: cli.source,
        replica: cli.replica,
        interval: Duration::from_secs(cli.interval),
        missing_source: cli.missing_source.into(),
    };

    println!(
        "replicat: syncing {} -> {} every {}s (audit log: {})",
        config.source.display(),
        config.replica.display(),
        cli.interval,
        audit.path().display(),
    );

    scheduler::run(&config, audit, &mut SystemClock, None)
}
