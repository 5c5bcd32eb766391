// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge rate limiting for high-frequency signals.
//!
//! A [`RateLimiter`] admits a call when at least `min_interval` has passed
//! since the last *admitted* call. Rejected calls are dropped: there is no
//! queueing and no trailing-edge execution. The first call ever made is
//! always admitted.
//!
//! [`Throttled`] pairs a limiter with an action, which is the closure form
//! used by callers that want a wrapped callable rather than a predicate.

use crate::time::{Duration, HostTime};

/// Leading-edge throttle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Option<HostTime>,
}

impl RateLimiter {
    /// Creates a limiter that has never admitted a call.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Minimum spacing between admitted calls.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time of the last admitted call.
    #[must_use]
    pub const fn last_admitted(&self) -> Option<HostTime> {
        self.last
    }

    /// Admits or rejects a call made at `now`, recording it when admitted.
    pub fn try_acquire(&mut self, now: HostTime) -> bool {
        let admit = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        };
        if admit {
            self.last = Some(now);
        }
        admit
    }

    /// Wraps `action` so that it only runs on admitted calls.
    pub fn guard<F>(self, action: F) -> Throttled<F> {
        Throttled {
            limiter: self,
            action,
        }
    }
}

/// An action guarded by a [`RateLimiter`].
#[derive(Debug)]
pub struct Throttled<F> {
    limiter: RateLimiter,
    action: F,
}

impl<F> Throttled<F> {
    /// Invokes the action with `arg` if the call is admitted.
    ///
    /// Returns the action's result, or `None` when the call was dropped.
    pub fn call<A, R>(&mut self, now: HostTime, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.limiter.try_acquire(now) {
            Some((self.action)(arg))
        } else {
            None
        }
    }

    /// The underlying limiter.
    #[must_use]
    pub const fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_inside_interval_runs_once() {
        let mut runs = 0_u32;
        let mut guarded = RateLimiter::new(Duration::from_millis(50)).guard(|()| runs += 1);
        // 100 calls spread over 40ms.
        for i in 0..100_u64 {
            let _ = guarded.call(HostTime::from_millis(1_000) + Duration(i * 400), ());
        }
        drop(guarded);
        assert_eq!(runs, 1);
    }

    #[test]
    fn call_after_interval_runs_again() {
        let mut runs = 0_u32;
        let mut guarded = RateLimiter::new(Duration::from_millis(50)).guard(|()| runs += 1);
        assert_eq!(guarded.call(HostTime::from_millis(0), ()), Some(()));
        assert_eq!(guarded.call(HostTime::from_millis(60), ()), Some(()));
        drop(guarded);
        assert_eq!(runs, 2);
    }

    #[test]
    fn spacing_is_measured_from_last_admitted_call() {
        let mut limiter = RateLimiter::new(Duration::from_millis(100));
        assert!(limiter.try_acquire(HostTime::from_millis(0)));
        assert!(!limiter.try_acquire(HostTime::from_millis(60)));
        // 120ms after the admitted call, even though only 60ms after the
        // dropped one.
        assert!(limiter.try_acquire(HostTime::from_millis(120)));
        assert_eq!(limiter.last_admitted(), Some(HostTime::from_millis(120)));
    }

    #[test]
    fn passes_arguments_through() {
        let mut guarded = RateLimiter::new(Duration::from_millis(30)).guard(|x: i32| x * 2);
        assert_eq!(guarded.call(HostTime(0), 21), Some(42));
        assert_eq!(guarded.call(HostTime(1), 21), None);
    }
}
