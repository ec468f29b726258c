use governor::clock::{Clock, DefaultClock};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::thread;

/// Client-side pacing in front of the stats service.
///
/// The service answers bursts with 429s; spreading requests out keeps the
/// throttle-retry loop in the fetcher from spinning.
pub struct RequestPacer {
    limiter: Option<DefaultDirectRateLimiter>,
    clock: DefaultClock,
}

impl RequestPacer {
    pub fn unlimited() -> Self {
        RequestPacer {
            limiter: None,
            clock: DefaultClock::default(),
        }
    }

    pub fn per_second(requests: NonZeroU32) -> Self {
        RequestPacer {
            limiter: Some(RateLimiter::direct(Quota::per_second(requests))),
            clock: DefaultClock::default(),
        }
    }

    pub fn from_config(requests_per_second: Option<NonZeroU32>) -> Self {
        requests_per_second.map_or_else(Self::unlimited, Self::per_second)
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }

    /// Blocks until one more request may be issued.
    pub fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            while let Err(not_until) = limiter.check() {
                thread::sleep(not_until.wait_time_from(self.clock.now()));
            }
        }
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::unlimited()
    }
}
