// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up animations.
//!
//! A [`CounterRun`] animates a displayed integer from 0 to a target over a
//! fixed duration with ease-out cubic progress. Runs are finite and cannot be
//! restarted: once a run reports [`CounterFrame::finished`], stepping it
//! again yields nothing, so the caller stops requesting frames.
//!
//! A [`CounterController`] owns the runs for one counter group and makes
//! sure each element gets at most one run, however many visibility signals
//! arrive for it.

use alloc::vec::Vec;

use crate::element::{Attributes, ElementId};
use crate::time::{Duration, HostTime};
use crate::visibility::ObserverOptions;

/// Ease-out cubic: `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(p: f64) -> f64 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// One displayed value produced by a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    /// The value to display.
    pub value: u64,
    /// Whether this was the final frame.
    pub finished: bool,
}

/// A single count-up animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterRun {
    element: ElementId,
    target: u64,
    duration: Duration,
    start: HostTime,
    last_value: u64,
    finished: bool,
}

impl CounterRun {
    /// Starts a run at `start`.
    ///
    /// A zero `duration` finishes on the first step.
    #[must_use]
    pub const fn new(element: ElementId, target: u64, duration: Duration, start: HostTime) -> Self {
        Self {
            element,
            target,
            duration,
            start,
            last_value: 0,
            finished: false,
        }
    }

    /// The animated element.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// The final value.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Whether the run has produced its final frame.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// The value displayed `elapsed` into the run, before the final frame.
    ///
    /// `floor(ease_out_cubic(elapsed / duration) * target)`, never above
    /// `target`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "eased value lies in [0, target]; truncation floors it"
    )]
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() {
            return self.target;
        }
        let p = elapsed.ticks() as f64 / self.duration.ticks() as f64;
        let eased = ease_out_cubic(p) * self.target as f64;
        (eased as u64).min(self.target)
    }

    /// Produces the frame for `now`, or `None` once the run has finished.
    ///
    /// On the first frame at or after `start + duration` the value is forced
    /// to exactly `target` and the run finishes. Displayed values never
    /// decrease, even if `now` goes backwards.
    pub fn step(&mut self, now: HostTime) -> Option<CounterFrame> {
        if self.finished {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let value = if elapsed >= self.duration {
            self.finished = true;
            self.target
        } else {
            self.value_at(elapsed).max(self.last_value)
        };
        self.last_value = value;
        Some(CounterFrame {
            value,
            finished: self.finished,
        })
    }
}

/// Configuration for one counter group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterGroupConfig {
    /// Visibility options for the group's watcher.
    pub observer: ObserverOptions,
    /// Duration of each run.
    pub duration: Duration,
    /// Whether runs wait for the element's declared delay.
    pub declared_delay: bool,
}

/// When a counter should start after becoming visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterStart {
    /// Start right away.
    Now,
    /// Start after the declared delay.
    After(Duration),
}

/// Identifies a run inside its [`CounterController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId(pub(crate) usize);

/// Owns the runs of one counter group.
#[derive(Clone, Debug)]
pub struct CounterController {
    config: CounterGroupConfig,
    fired: Vec<ElementId>,
    runs: Vec<CounterRun>,
}

impl CounterController {
    /// Creates a controller for a group.
    #[must_use]
    pub fn new(config: CounterGroupConfig) -> Self {
        Self {
            config,
            fired: Vec::new(),
            runs: Vec::new(),
        }
    }

    /// The group configuration.
    #[must_use]
    pub const fn config(&self) -> &CounterGroupConfig {
        &self.config
    }

    /// Handles a "became visible" event.
    ///
    /// Returns `None` if the element was already handled, so a run is never
    /// scheduled twice even when the watcher is degraded or repeats itself.
    pub fn on_became_visible(
        &mut self,
        element: ElementId,
        attrs: &Attributes,
    ) -> Option<CounterStart> {
        if self.fired.contains(&element) {
            return None;
        }
        self.fired.push(element);
        Some(if self.config.declared_delay {
            CounterStart::After(Duration::from_millis(attrs.delay_ms()))
        } else {
            CounterStart::Now
        })
    }

    /// Starts the run for `element` with its declared target.
    pub fn start(&mut self, element: ElementId, attrs: &Attributes, now: HostTime) -> RunId {
        let id = RunId(self.runs.len());
        self.runs
            .push(CounterRun::new(element, attrs.target(), self.config.duration, now));
        id
    }

    /// Steps a run; `None` once it has finished.
    pub fn step(&mut self, run: RunId, now: HostTime) -> Option<CounterFrame> {
        self.runs.get_mut(run.0).and_then(|r| r.step(now))
    }

    /// Looks up a run.
    #[must_use]
    pub fn run(&self, run: RunId) -> Option<&CounterRun> {
        self.runs.get(run.0)
    }

    /// Number of runs started.
    #[must_use]
    pub fn started(&self) -> usize {
        self.runs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(i: u32) -> ElementId {
        ElementId::from_index(i)
    }

    fn hero() -> CounterGroupConfig {
        CounterGroupConfig {
            observer: ObserverOptions::threshold(0.5),
            duration: Duration::from_millis(2200),
            declared_delay: false,
        }
    }

    #[test]
    fn easing_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < 1e-12);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-12);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert!((ease_out_cubic(3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn run_is_monotonic_and_lands_on_target() {
        let start = HostTime::from_millis(10_000);
        let mut run = CounterRun::new(el(0), 250, Duration::from_millis(2200), start);

        let mut values = Vec::new();
        let mut t = start;
        loop {
            t = t + Duration(16_667);
            let frame = run.step(t).expect("running");
            values.push(frame.value);
            if frame.finished {
                break;
            }
        }

        assert!(values[0] <= 3, "first frame is near zero, got {}", values[0]);
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "non-decreasing");
        assert!(values.iter().all(|v| *v <= 250));
        assert_eq!(values.last(), Some(&250));
        assert!(run.step(t + Duration::from_millis(16)).is_none(), "terminal");
    }

    #[test]
    fn late_first_frame_jumps_to_target() {
        let mut run = CounterRun::new(el(0), 1200, Duration::from_millis(2500), HostTime(0));
        let frame = run.step(HostTime::from_millis(9_000)).expect("first frame");
        assert_eq!(
            frame,
            CounterFrame {
                value: 1200,
                finished: true
            }
        );
    }

    #[test]
    fn clock_going_backwards_never_lowers_value() {
        let mut run = CounterRun::new(el(0), 100, Duration::from_millis(1000), HostTime::from_millis(0));
        let a = run.step(HostTime::from_millis(500)).expect("frame").value;
        let b = run.step(HostTime::from_millis(100)).expect("frame").value;
        assert!(b >= a);
    }

    #[test]
    fn zero_target_and_zero_duration() {
        let mut zero = CounterRun::new(el(0), 0, Duration::from_millis(2000), HostTime(0));
        assert_eq!(zero.step(HostTime::from_millis(1)).map(|f| f.value), Some(0));

        let mut instant = CounterRun::new(el(0), 42, Duration::ZERO, HostTime(0));
        assert_eq!(
            instant.step(HostTime(0)),
            Some(CounterFrame {
                value: 42,
                finished: true
            })
        );
    }

    #[test]
    fn controller_dedupes_elements() {
        let mut c = CounterController::new(hero());
        let attrs = Attributes::with_target("250");
        assert_eq!(c.on_became_visible(el(1), &attrs), Some(CounterStart::Now));
        assert_eq!(c.on_became_visible(el(1), &attrs), None);
    }

    #[test]
    fn grid_group_uses_declared_delay() {
        let mut c = CounterController::new(CounterGroupConfig {
            observer: ObserverOptions::threshold(0.4),
            duration: Duration::from_millis(2500),
            declared_delay: true,
        });
        let attrs = Attributes {
            delay: Some("300".into()),
            target: Some("98".into()),
        };
        assert_eq!(
            c.on_became_visible(el(2), &attrs),
            Some(CounterStart::After(Duration::from_millis(300)))
        );

        let run = c.start(el(2), &attrs, HostTime(0));
        assert_eq!(c.run(run).map(CounterRun::target), Some(98));
        assert_eq!(c.started(), 1);
    }
}
