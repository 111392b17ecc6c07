use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::args::TargetRate;

/// Sleeps out whatever is left of each request's share of the target rate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub(crate) fn new(rate: TargetRate) -> Self {
        Self {
            interval: rate.interval(),
        }
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    /// `max(0, interval - elapsed)`.
    pub(crate) const fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    pub(crate) async fn pace(&self, iteration_start: Instant) {
        let wait = self.remaining(iteration_start.elapsed());
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }
}
