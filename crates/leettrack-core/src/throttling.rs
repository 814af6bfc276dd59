use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Spaces out upstream fetches during bulk refreshes.
///
/// One permit per `interval`, no burst. Clones share the same budget.
#[derive(Clone)]
pub struct RefreshThrottle {
    limiter: Arc<DirectRateLimiter>,
    interval: Duration,
}

impl RefreshThrottle {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn per_interval(interval: Duration) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_for_interval(interval))),
            interval,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes a permit if one is available, otherwise reports how long until
    /// the next one.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Waits until a permit is available and takes it.
    pub async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }
}

impl Default for RefreshThrottle {
    fn default() -> Self {
        Self::per_interval(Self::DEFAULT_INTERVAL)
    }
}

impl std::fmt::Debug for RefreshThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshThrottle")
            .field("interval", &self.interval)
            .finish()
    }
}

fn quota_for_interval(interval: Duration) -> Quota {
    let period = interval.max(Duration::from_millis(1));
    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(NonZeroU32::MIN)
}
