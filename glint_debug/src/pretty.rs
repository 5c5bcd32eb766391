// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds since the host clock origin.

use std::io::Write;

use glint_core::time::HostTime;
use glint_core::trace::{
    CounterEvent, CounterPhase, FormEvent, HandlerEvent, LightboxEvent, LightboxTransition,
    LoadedEvent, MenuEvent, RevealEvent, TraceSink, VisibleEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    show_dropped: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("show_dropped", &self.show_dropped)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Throttle-dropped handler calls are omitted; see
    /// [`show_dropped`](Self::show_dropped).
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            show_dropped: false,
        }
    }

    /// Also print handler calls the throttle dropped.
    ///
    /// Scroll and pointer streams produce one such line per event.
    #[must_use]
    pub fn show_dropped(mut self, show: bool) -> Self {
        self.show_dropped = show;
        self
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.as_millis_f64()
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_handler(&mut self, e: &HandlerEvent) {
        if !e.admitted && !self.show_dropped {
            return;
        }
        let verdict = if e.admitted { "run" } else { "dropped" };
        let _ = writeln!(
            self.writer,
            "[handler] {:?} on {:?} {verdict} at {:.1}ms",
            e.handler,
            e.source,
            ms(e.at),
        );
    }

    fn on_visible(&mut self, e: &VisibleEvent) {
        let mode = if e.degraded { " (degraded)" } else { "" };
        let _ = writeln!(
            self.writer,
            "[visible] {:?} {:?} at {:.1}ms{mode}",
            e.watcher,
            e.element,
            ms(e.at),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] {:?} at {:.1}ms",
            e.element,
            ms(e.at)
        );
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        let phase = match e.phase {
            CounterPhase::Scheduled { delay } => format!("scheduled +{:.0}ms", delay.as_millis_f64()),
            CounterPhase::Started { target } => format!("started target={target}"),
            CounterPhase::Finished { value } => format!("finished value={value}"),
        };
        let _ = writeln!(
            self.writer,
            "[counter] {:?} {:?} {phase} at {:.1}ms",
            e.watcher,
            e.element,
            ms(e.at),
        );
    }

    fn on_lightbox(&mut self, e: &LightboxEvent) {
        let what = match e.transition {
            LightboxTransition::Opened => "opened".to_owned(),
            LightboxTransition::Replaced => "replaced".to_owned(),
            LightboxTransition::Closed(trigger) => format!("closed by {trigger:?}"),
        };
        let _ = writeln!(self.writer, "[lightbox] {what} at {:.1}ms", ms(e.at));
    }

    fn on_form(&mut self, e: &FormEvent) {
        let _ = writeln!(
            self.writer,
            "[form] {:?} -> {:?} errors={} at {:.1}ms",
            e.from,
            e.to,
            e.errors,
            ms(e.at),
        );
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        let state = if e.open { "open" } else { "closed" };
        let _ = writeln!(self.writer, "[menu] {state} at {:.1}ms", ms(e.at));
    }

    fn on_loaded(&mut self, e: &LoadedEvent) {
        let mode = if e.degraded { " (no visibility primitive)" } else { "" };
        let _ = writeln!(
            self.writer,
            "[loaded] elements={} at {:.1}ms{mode}",
            e.elements,
            ms(e.at),
        );
    }
}
