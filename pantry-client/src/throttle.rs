use std::time::Duration;

/// A flat, fixed-rate throttle: every call waits the same interval.
///
/// There is no burst allowance and no bookkeeping of when the last call
/// happened, so `n` requests per minute always cost at least `60s / n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    interval: Duration,
}

impl RateLimiter {
    /// Space calls out to at most `requests` per minute.
    pub fn per_minute(requests: u32) -> Self {
        Self {
            interval: Duration::from_secs(60) / requests.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn wait(&self) {
        tokio::time::sleep(self.interval).await;
    }
}
