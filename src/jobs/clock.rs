//! Clock abstraction
//!
//! The job supervisor sleeps between polls. Production uses the tokio timer;
//! tests inject a manual clock that only counts ticks, so a full timeout run
//! takes no wall-clock time.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Sleep provider for the polling loop
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the calling task for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub type ClockRef = Arc<dyn Clock>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_sleeps() {
        let clock = TokioClock;
        let before = tokio::time::Instant::now();
        clock.sleep(Duration::from_secs(5)).await;
        assert!(before.elapsed() >= Duration::from_secs(5));
    }
}
