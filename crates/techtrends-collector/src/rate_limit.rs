//! Rolling-window request pacing for the post source.
//!
//! [`RateLimiter::acquire`] is called before every outbound search. It keeps
//! a count of requests since the start of the current window and sleeps:
//!
//! | Situation                                   | Sleep                                   |
//! |---------------------------------------------|-----------------------------------------|
//! | first request ever                          | none                                    |
//! | count below the ceiling                     | fixed spacing (3 s)                     |
//! | count reaches the ceiling (15)              | rest of the window plus slack (60 s), then reset |
//!
//! The window also resets on its own once 900 s have passed since it began.
//! This is a window approximation, not a token bucket: calls below the
//! ceiling always pay the flat spacing regardless of remaining quota.

use std::future::Future;
use std::time::{Duration, Instant};

/// Source of time and sleeping for the limiter.
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall-clock time with `tokio` timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Window length, ceiling, and delays used by [`RateLimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub window: Duration,
    /// Request count at which the limiter waits out the window.
    pub max_requests: u32,
    /// Extra wait added on top of the remaining window.
    pub slack: Duration,
    /// Delay after every request below the ceiling.
    pub spacing: Duration,
    /// Pause after the source reports its quota exhausted.
    pub quota_backoff: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(900),
            max_requests: 15,
            slack: Duration::from_secs(60),
            spacing: Duration::from_secs(3),
            quota_backoff: Duration::from_secs(900),
        }
    }
}

pub struct RateLimiter<C = TokioClock> {
    clock: C,
    policy: RateLimitPolicy,
    window_start: Option<Instant>,
    request_count: u32,
}

impl RateLimiter<TokioClock> {
    #[must_use]
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, TokioClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    #[must_use]
    pub fn with_clock(policy: RateLimitPolicy, clock: C) -> Self {
        Self {
            clock,
            policy,
            window_start: None,
            request_count: 0,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Requests counted since [`Self::window_start`].
    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Start of the current window; `None` until the first request.
    #[must_use]
    pub fn window_start(&self) -> Option<Instant> {
        self.window_start
    }

    /// Waits as needed so the next request stays under the window quota.
    pub async fn acquire(&mut self) {
        let now = self.clock.now();

        let Some(window_start) = self.window_start else {
            self.window_start = Some(now);
            self.request_count = 1;
            tracing::debug!("first request in rate window");
            return;
        };

        // Elapsed time is measured once, before any reset, and reused for the
        // ceiling wait below.
        let elapsed = now.saturating_duration_since(window_start);

        if elapsed >= self.policy.window {
            tracing::debug!(
                elapsed_secs = elapsed.as_secs(),
                "rate window elapsed, resetting counter"
            );
            self.request_count = 0;
            self.window_start = Some(now);
        }

        self.request_count = self.request_count.saturating_add(1);
        tracing::debug!(request = self.request_count, "request in current window");

        if self.request_count >= self.policy.max_requests {
            let wait = (self.policy.window + self.policy.slack).saturating_sub(elapsed);
            if !wait.is_zero() {
                tracing::warn!(
                    wait_secs = wait.as_secs(),
                    "rate limit approaching, waiting out the window"
                );
                self.clock.sleep(wait).await;
                self.request_count = 0;
                self.window_start = Some(self.clock.now());
            }
        } else {
            self.clock.sleep(self.policy.spacing).await;
        }
    }

    /// Sleeps for the configured quota back-off after the source reported
    /// its quota exhausted. The window counters are left untouched.
    pub async fn back_off_after_quota(&self) {
        tracing::warn!(
            wait_secs = self.policy.quota_backoff.as_secs(),
            "source quota exceeded, backing off"
        );
        self.clock.sleep(self.policy.quota_backoff).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualClock;

    fn limiter() -> (RateLimiter<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (
            RateLimiter::with_clock(RateLimitPolicy::default(), clock.clone()),
            clock,
        )
    }

    #[tokio::test]
    async fn first_acquire_never_sleeps() {
        let (mut limiter, clock) = limiter();
        limiter.acquire().await;
        assert!(clock.sleeps().is_empty());
        assert_eq!(limiter.request_count(), 1);
        assert_eq!(limiter.window_start(), Some(clock.origin()));
    }

    #[tokio::test]
    async fn calls_below_ceiling_sleep_fixed_spacing() {
        let (mut limiter, clock) = limiter();
        for _ in 0..14 {
            limiter.acquire().await;
        }
        assert_eq!(limiter.request_count(), 14);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(3); 13]);
    }

    #[tokio::test]
    async fn fifteenth_call_waits_out_window_and_resets() {
        let (mut limiter, clock) = limiter();
        for _ in 0..15 {
            limiter.acquire().await;
        }

        // Calls 2..=14 each slept 3s, so the 15th call saw 39s elapsed.
        let sleeps = clock.sleeps();
        assert_eq!(sleeps.len(), 14);
        assert_eq!(sleeps[13], Duration::from_secs(900 - 39 + 60));
        assert_eq!(limiter.request_count(), 0);
        assert_eq!(
            limiter.window_start(),
            Some(clock.origin() + Duration::from_secs(39 + 921))
        );
    }

    #[tokio::test]
    async fn counting_restarts_after_ceiling_reset() {
        let (mut limiter, clock) = limiter();
        for _ in 0..16 {
            limiter.acquire().await;
        }
        assert_eq!(limiter.request_count(), 1);
        assert_eq!(clock.sleeps().last(), Some(&Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn elapsed_window_resets_count_without_long_wait() {
        let (mut limiter, clock) = limiter();
        limiter.acquire().await;
        limiter.acquire().await;
        clock.advance(Duration::from_secs(900));
        limiter.acquire().await;

        assert_eq!(limiter.request_count(), 1);
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_secs(3), Duration::from_secs(3)]
        );
        assert_eq!(
            limiter.window_start(),
            Some(clock.origin() + Duration::from_secs(903))
        );
    }

    #[tokio::test]
    async fn ceiling_after_late_reset_skips_wait_when_nothing_remains() {
        let policy = RateLimitPolicy {
            max_requests: 1,
            ..RateLimitPolicy::default()
        };
        let clock = ManualClock::new();
        let mut limiter = RateLimiter::with_clock(policy, clock.clone());
        limiter.acquire().await;
        clock.advance(Duration::from_secs(1_000));
        limiter.acquire().await;

        // 900 - 1000 + 60 <= 0: no sleep and the counter is left at the ceiling.
        assert!(clock.sleeps().is_empty());
        assert_eq!(limiter.request_count(), 1);
    }

    #[tokio::test]
    async fn quota_back_off_sleeps_configured_duration() {
        let (limiter, clock) = limiter();
        limiter.back_off_after_quota().await;
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(900)]);
        assert_eq!(limiter.request_count(), 0);
    }
}
