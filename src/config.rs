//! Controller configuration

use crate::error::{Error, Result};
use crate::jobs::supervisor::DEFAULT_POLL_INTERVAL;
use std::time::Duration;

/// Configuration for the pool orchestrator
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Pause between job-status polls
    pub poll_interval: Duration,
    /// Tick bound for disk-level pool reassignment jobs
    pub reassign_timeout_ticks: u64,
    /// Tick bound for pool-to-aggregate mapping jobs
    pub mapping_timeout_ticks: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            reassign_timeout_ticks: 300,
            mapping_timeout_ticks: 120,
        }
    }
}

impl ControllerConfig {
    /// Reject bounds that would make the supervisor loop degenerate
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Configuration("poll interval must be non-zero".into()));
        }
        if self.reassign_timeout_ticks == 0 || self.mapping_timeout_ticks == 0 {
            return Err(Error::Configuration(
                "job timeouts must be at least one polling tick".into(),
            ));
        }
        Ok(())
    }
}
