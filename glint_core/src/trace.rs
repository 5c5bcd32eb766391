// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page orchestration.
//!
//! This module provides a [`TraceSink`] trait with one method per
//! orchestration event. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::element::ElementId;
use crate::form::FormState;
use crate::lightbox::CloseTrigger;
use crate::registry::{Handler, SourceKind, WatcherKind};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Progress of a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterPhase {
    /// Start deferred by the declared delay.
    Scheduled {
        /// The delay.
        delay: Duration,
    },
    /// Run started.
    Started {
        /// Final value.
        target: u64,
    },
    /// Final frame presented.
    Finished {
        /// Displayed value.
        value: u64,
    },
}

/// A lightbox state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightboxTransition {
    /// Closed to open.
    Opened,
    /// Open with new content.
    Replaced,
    /// Open to closed.
    Closed(CloseTrigger),
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for each registration consulted by a signal.
#[derive(Clone, Copy, Debug)]
pub struct HandlerEvent {
    /// The registration's handler.
    pub handler: Handler,
    /// The signal category.
    pub source: SourceKind,
    /// Dispatch time.
    pub at: HostTime,
    /// `false` when the throttle dropped the call.
    pub admitted: bool,
}

/// Emitted when a watcher fires an element.
#[derive(Clone, Copy, Debug)]
pub struct VisibleEvent {
    /// Which watcher fired.
    pub watcher: WatcherKind,
    /// The element.
    pub element: ElementId,
    /// When it fired.
    pub at: HostTime,
    /// Fired at registration because no primitive was available.
    pub degraded: bool,
}

/// Emitted when an element is revealed.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// The element.
    pub element: ElementId,
    /// When it was revealed.
    pub at: HostTime,
}

/// Emitted as a counter progresses.
#[derive(Clone, Copy, Debug)]
pub struct CounterEvent {
    /// The counter group.
    pub watcher: WatcherKind,
    /// The counter element.
    pub element: ElementId,
    /// When it happened.
    pub at: HostTime,
    /// What happened.
    pub phase: CounterPhase,
}

/// Emitted on lightbox transitions.
#[derive(Clone, Copy, Debug)]
pub struct LightboxEvent {
    /// When it happened.
    pub at: HostTime,
    /// What happened.
    pub transition: LightboxTransition,
}

/// Emitted when the form handles a submit, completion, or state change.
#[derive(Clone, Copy, Debug)]
pub struct FormEvent {
    /// When it happened.
    pub at: HostTime,
    /// State before.
    pub from: FormState,
    /// State after.
    pub to: FormState,
    /// Fields currently showing an error.
    pub errors: usize,
}

/// Emitted when the navigation menu opens or closes.
#[derive(Clone, Copy, Debug)]
pub struct MenuEvent {
    /// When it happened.
    pub at: HostTime,
    /// New state.
    pub open: bool,
}

/// Emitted once when the page finishes loading.
#[derive(Clone, Copy, Debug)]
pub struct LoadedEvent {
    /// Load time.
    pub at: HostTime,
    /// Registered elements.
    pub elements: usize,
    /// Whether the visibility watchers run degraded.
    pub degraded: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the page.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for each registration a signal consults.
    fn on_handler(&mut self, e: &HandlerEvent) {
        _ = e;
    }

    /// Called when a watcher fires an element.
    fn on_visible(&mut self, e: &VisibleEvent) {
        _ = e;
    }

    /// Called when an element is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called as a counter progresses.
    fn on_counter(&mut self, e: &CounterEvent) {
        _ = e;
    }

    /// Called on lightbox transitions.
    fn on_lightbox(&mut self, e: &LightboxEvent) {
        _ = e;
    }

    /// Called on form activity.
    fn on_form(&mut self, e: &FormEvent) {
        _ = e;
    }

    /// Called when the menu opens or closes.
    fn on_menu(&mut self, e: &MenuEvent) {
        _ = e;
    }

    /// Called once at load.
    fn on_loaded(&mut self, e: &LoadedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! emit {
    ($(#[$doc:meta])* $name:ident, $event:ty, $method:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    emit!(
        /// Emits a [`HandlerEvent`].
        handler, HandlerEvent, on_handler
    );
    emit!(
        /// Emits a [`VisibleEvent`].
        visible, VisibleEvent, on_visible
    );
    emit!(
        /// Emits a [`RevealEvent`].
        reveal, RevealEvent, on_reveal
    );
    emit!(
        /// Emits a [`CounterEvent`].
        counter, CounterEvent, on_counter
    );
    emit!(
        /// Emits a [`LightboxEvent`].
        lightbox, LightboxEvent, on_lightbox
    );
    emit!(
        /// Emits a [`FormEvent`].
        form, FormEvent, on_form
    );
    emit!(
        /// Emits a [`MenuEvent`].
        menu, MenuEvent, on_menu
    );
    emit!(
        /// Emits a [`LoadedEvent`].
        loaded, LoadedEvent, on_loaded
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_handler() -> HandlerEvent {
        HandlerEvent {
            handler: Handler::ScrollChrome,
            source: SourceKind::Scroll,
            at: HostTime(1_000),
            admitted: false,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_handler(&sample_handler());
        sink.on_menu(&MenuEvent {
            at: HostTime(0),
            open: true,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.handler(&sample_handler());
        tracer.loaded(&LoadedEvent {
            at: HostTime(0),
            elements: 0,
            degraded: false,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            dropped: Vec<HostTime>,
        }
        impl TraceSink for RecordingSink {
            fn on_handler(&mut self, e: &HandlerEvent) {
                if !e.admitted {
                    self.dropped.push(e.at);
                }
            }
        }

        let mut sink = RecordingSink {
            dropped: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.handler(&sample_handler());
        drop(tracer);
        assert_eq!(sink.dropped, [HostTime(1_000)]);
    }
}
