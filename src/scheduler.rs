//! Periodic driver for the reconciler.
//!
//! The first cycle runs immediately, then one per interval for the life of the
//! process. Cycles never overlap: a tick that comes due while a cycle is still
//! running is dropped and the schedule resumes at the next interval boundary.

use crate::reconciler::{CycleOutcome, Reconciler};
use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tokio::time::{self, Instant};

/// Runs reconciliation cycles on a fixed interval.
pub struct Scheduler {
    reconciler: Reconciler,
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler using the reconciler's configured interval.
    pub fn new(reconciler: Reconciler) -> Self {
        let interval = reconciler.config().interval();
        Self {
            reconciler,
            interval,
        }
    }

    /// Run forever.
    pub async fn run(self) {
        tracing::info!(
            "Starting reconciliation every {} minutes for {} domains",
            self.reconciler.config().interval_minutes,
            self.reconciler.config().targets.len()
        );

        let start = Instant::now();
        loop {
            self.run_once().await;
            time::sleep(until_next_tick(start.elapsed(), self.interval)).await;
        }
    }

    /// Run a single cycle wrapped in its banner and trailer lines.
    pub async fn run_once(&self) -> CycleOutcome {
        tracing::info!("{}", banner(Local::now().naive_local()));
        let outcome = self.reconciler.run_cycle().await;
        tracing::info!("{}", trailer(self.reconciler.config().interval_minutes));
        outcome
    }
}

/// Wait from `elapsed` (time since the first cycle) to the next multiple of `period`.
/// A cycle ending exactly on a boundary waits a full period.
fn until_next_tick(elapsed: Duration, period: Duration) -> Duration {
    let into_period = elapsed.as_nanos() % period.as_nanos();
    period - Duration::from_nanos(into_period as u64)
}

fn banner(now: NaiveDateTime) -> String {
    format!("--- RERUNNING ({}) ---", now.format("%-d/%-m/%Y | %H:%M:%S"))
}

fn trailer(interval_minutes: u64) -> String {
    format!("--- FINISHED (will rerun in {} minutes) ---", interval_minutes)
}
