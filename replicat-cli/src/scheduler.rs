//! Retry-forever scheduler driving sync cycles on a fixed interval.
//!
//! The interval runs between cycle *completion* and the next cycle start,
//! so the effective period is interval + cycle duration. A failed cycle is
//! logged (stderr and one `Error` audit record) and the loop sleeps and
//! retries — no backoff, no retry limit. The clock is injectable so tests
//! run bounded without real delays.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use replicat_audit::AuditLog;
use replicat_engine::{sync_cycle, AuditAction, CycleSummary, MissingSourcePolicy, PlanOptions};

/// Sleep provider for the loop.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Real wall-clock sleeping.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Everything the loop needs to run.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval: Duration,
    pub missing_source: MissingSourcePolicy,
}

/// Drive sync cycles until `max_cycles` completes, or forever when `None`.
///
/// The binary always passes `None`; bounded runs exist for tests.
pub fn run(
    config: &LoopConfig,
    mut audit: AuditLog,
    clock: &mut dyn Clock,
    max_cycles: Option<u64>,
) -> Result<()> {
    let options = PlanOptions {
        missing_source: config.missing_source,
    };
    let mut completed: u64 = 0;

    loop {
        match sync_cycle(&config.source, &config.replica, options, &mut audit) {
            Ok(summary) => print_summary(&summary),
            Err(err) => {
                tracing::error!("sync cycle failed: {err}");
                if let Err(log_err) = audit.record(AuditAction::Error, &err.to_string()) {
                    tracing::error!("failed to append audit record: {log_err}");
                }
            }
        }

        completed += 1;
        if let Some(max) = max_cycles {
            if completed >= max {
                return Ok(());
            }
        }
        clock.sleep(config.interval);
    }
}

fn print_summary(summary: &CycleSummary) {
    if summary.is_noop() {
        println!("✓ up to date — no changes detected");
        return;
    }
    let stats = summary.stats;
    println!(
        "✓ synced ({} folders created, {} files copied, {} files removed, {} folders removed, {} errors)",
        stats.created_dirs,
        stats.copied_files,
        stats.removed_files,
        stats.removed_dirs,
        stats.errors + summary.plan_issues,
    );
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use replicat_audit::read_records;

    use super::*;

    struct FakeClock {
        sleeps: Vec<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self { sleeps: Vec::new() }
        }
    }

    impl Clock for FakeClock {
        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
        }
    }

    fn config(source: &Path, replica: &Path) -> (LoopConfig, TempDir) {
        let log_dir = TempDir::new().unwrap();
        (
            LoopConfig {
                source: source.to_path_buf(),
                replica: replica.to_path_buf(),
                interval: Duration::from_secs(7),
                missing_source: MissingSourcePolicy::Fail,
            },
            log_dir,
        )
    }

    #[test]
    fn bounded_run_converges_and_sleeps_between_cycles() {
        let source = TempDir::new().unwrap();
        let replica = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), "hello").unwrap();

        let (config, log_dir) = config(source.path(), replica.path());
        let log_path = log_dir.path().join("audit.log");
        let audit = AuditLog::open(&log_path).unwrap();
        let mut clock = FakeClock::new();

        run(&config, audit, &mut clock, Some(2)).unwrap();

        assert_eq!(
            fs::read_to_string(replica.path().join("a.txt")).unwrap(),
            "hello"
        );
        // Sleep happens between cycles, not after the last one.
        assert_eq!(clock.sleeps, vec![Duration::from_secs(7)]);

        let records = read_records(&log_path).unwrap();
        assert_eq!(records.len(), 1, "second cycle was a no-op");
        assert_eq!(records[0].action, "Copied File");
    }

    #[test]
    fn failed_cycle_is_logged_and_retried() {
        let replica = TempDir::new().unwrap();
        fs::write(replica.path().join("keep.txt"), "precious").unwrap();

        let missing = replica.path().join("no-such-source");
        let (config, log_dir) = config(&missing, replica.path());
        let log_path = log_dir.path().join("audit.log");
        let audit = AuditLog::open(&log_path).unwrap();
        let mut clock = FakeClock::new();

        run(&config, audit, &mut clock, Some(3)).unwrap();

        assert!(
            replica.path().join("keep.txt").exists(),
            "failed cycles must not touch the replica"
        );
        assert_eq!(clock.sleeps.len(), 2, "loop keeps retrying after errors");

        let records = read_records(&log_path).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.action == "Error"));
    }

    struct MutatingClock {
        source: PathBuf,
        slept: usize,
    }

    impl Clock for MutatingClock {
        fn sleep(&mut self, _duration: Duration) {
            if self.slept == 0 {
                fs::write(self.source.join("late.txt"), "added between cycles").unwrap();
            }
            self.slept += 1;
        }
    }

    #[test]
    fn source_changes_between_cycles_are_picked_up() {
        let source = TempDir::new().unwrap();
        let replica = TempDir::new().unwrap();
        fs::write(source.path().join("early.txt"), "first").unwrap();

        let (config, log_dir) = config(source.path(), replica.path());
        let audit = AuditLog::open(&log_dir.path().join("audit.log")).unwrap();
        let mut clock = MutatingClock {
            source: source.path().to_path_buf(),
            slept: 0,
        };

        run(&config, audit, &mut clock, Some(2)).unwrap();

        assert!(replica.path().join("early.txt").exists());
        assert_eq!(
            fs::read_to_string(replica.path().join("late.txt")).unwrap(),
            "added between cycles"
        );
    }
}
