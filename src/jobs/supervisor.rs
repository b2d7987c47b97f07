//! Job supervisor
//!
//! Drives one asynchronous cluster job to completion: sleep, poll, repeat,
//! with the timeout bound counted in polling ticks. Absence of the job from
//! the queue means it completed (cluster convention); a reported non-success
//! state keeps the loop polling until the bound is hit, including a reported
//! `failure`, which only becomes terminal through the timeout.

use crate::domain::model::{JobId, JobState};
use crate::domain::ports::JobMonitor;
use crate::error::{Error, Result};
use crate::jobs::clock::Clock;
use std::time::Duration;
use tracing::{debug, info};

/// Default pause between job-status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Supervises one asynchronous cluster job at a time
///
/// Borrowing the monitor and clock keeps the supervisor cheap to construct;
/// the orchestrator builds one per awaited job.
pub struct JobSupervisor<'a, M: JobMonitor + ?Sized> {
    monitor: &'a M,
    clock: &'a dyn Clock,
    poll_interval: Duration,
}

impl<'a, M: JobMonitor + ?Sized> JobSupervisor<'a, M> {
    pub fn new(monitor: &'a M, clock: &'a dyn Clock) -> Self {
        Self {
            monitor,
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Await the job until it reaches `success` or the tick bound elapses
    ///
    /// The elapsed counter is checked right after each sleep, before that
    /// tick's poll result is considered: a job that completes in the same
    /// tick it times out is still reported as timed out. `timeout_ticks` is
    /// therefore a number of polling ticks, not wall-clock seconds.
    pub async fn await_job(&self, job_id: JobId, timeout_ticks: u64) -> Result<()> {
        let mut state: Option<JobState> = None;
        let mut elapsed: u64 = 0;

        while state != Some(JobState::Success) {
            self.clock.sleep(self.poll_interval).await;
            elapsed += 1;
            if elapsed > timeout_ticks {
                return Err(Error::JobTimedOut {
                    job_id,
                    ticks: timeout_ticks,
                });
            }

            let poll = self.monitor.poll_job(job_id).await?;
            match poll.records {
                // Job purged from the queue: absence means completion.
                0 => state = Some(JobState::Success),
                1 => {
                    debug!(job = %job_id, state = ?poll.state, tick = elapsed, "job still pending");
                    state = poll.state;
                }
                records => {
                    return Err(Error::JobRecordConflict { job_id, records });
                }
            }
        }

        info!(job = %job_id, ticks = elapsed, "job reached success");
        Ok(())
    }
}
