// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] keeps an owned copy of every event in arrival order.
//! Recordings can be inspected directly or replayed into another sink, for
//! example a [`PrettyPrintSink`](crate::pretty::PrettyPrintSink) after a
//! failing run.

use glint_core::trace::{
    CounterEvent, FormEvent, HandlerEvent, LightboxEvent, LoadedEvent, MenuEvent, RevealEvent,
    TraceSink, VisibleEvent,
};

/// A recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A registration was consulted.
    Handler(HandlerEvent),
    /// A watcher fired.
    Visible(VisibleEvent),
    /// An element was revealed.
    Reveal(RevealEvent),
    /// A counter progressed.
    Counter(CounterEvent),
    /// The lightbox changed state.
    Lightbox(LightboxEvent),
    /// The form changed state.
    Form(FormEvent),
    /// The menu opened or closed.
    Menu(MenuEvent),
    /// The page loaded.
    Loaded(LoadedEvent),
}

/// Records every event.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Delivers every recorded event to `sink`, in order.
    pub fn replay(&self, sink: &mut dyn TraceSink) {
        for event in &self.events {
            match event {
                RecordedEvent::Handler(e) => sink.on_handler(e),
                RecordedEvent::Visible(e) => sink.on_visible(e),
                RecordedEvent::Reveal(e) => sink.on_reveal(e),
                RecordedEvent::Counter(e) => sink.on_counter(e),
                RecordedEvent::Lightbox(e) => sink.on_lightbox(e),
                RecordedEvent::Form(e) => sink.on_form(e),
                RecordedEvent::Menu(e) => sink.on_menu(e),
                RecordedEvent::Loaded(e) => sink.on_loaded(e),
            }
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_handler(&mut self, e: &HandlerEvent) {
        self.events.push(RecordedEvent::Handler(*e));
    }

    fn on_visible(&mut self, e: &VisibleEvent) {
        self.events.push(RecordedEvent::Visible(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal(*e));
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        self.events.push(RecordedEvent::Counter(*e));
    }

    fn on_lightbox(&mut self, e: &LightboxEvent) {
        self.events.push(RecordedEvent::Lightbox(*e));
    }

    fn on_form(&mut self, e: &FormEvent) {
        self.events.push(RecordedEvent::Form(*e));
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        self.events.push(RecordedEvent::Menu(*e));
    }

    fn on_loaded(&mut self, e: &LoadedEvent) {
        self.events.push(RecordedEvent::Loaded(*e));
    }
}

#[cfg(test)]
mod tests {
    use glint_core::backend::NoLayout;
    use glint_core::config::PageConfig;
    use glint_core::element::{Attributes, ElementStore};
    use glint_core::page::{Page, PageMarkup};
    use glint_core::registry::{Handler, Signal, WatcherKind};
    use glint_core::scroll::ScrollSnapshot;
    use glint_core::time::HostTime;
    use glint_core::trace::{CounterPhase, Tracer};
    use glint_core::visibility::Availability;

    use super::*;
    use crate::pretty::PrettyPrintSink;

    fn degraded_page() -> Page {
        let mut store = ElementStore::new();
        let card = store.register_with("card", Attributes::with_delay("200"));
        let stat = store.register_with("stat", Attributes::with_target("40"));
        let markup = PageMarkup {
            reveal: vec![card],
            hero_counters: vec![stat],
            ..PageMarkup::default()
        };
        Page::new(PageConfig::standard(), store, markup, Availability::Degraded)
    }

    #[test]
    fn degraded_mount_traces_immediate_fires() {
        let mut page = degraded_page();
        let mut sink = RecorderSink::new();
        let _ = page.mount(HostTime::from_millis(5), &NoLayout, &mut Tracer::new(&mut sink));

        let visible: Vec<_> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Visible(v) => Some((v.watcher, v.degraded)),
                _ => None,
            })
            .collect();
        assert_eq!(
            visible,
            [(WatcherKind::Reveal, true), (WatcherKind::HeroCounter, true)]
        );
        assert!(sink.events().iter().any(|e| matches!(
            e,
            RecordedEvent::Counter(CounterEvent {
                phase: CounterPhase::Started { target: 40 },
                ..
            })
        )));
        assert!(matches!(
            sink.events().last(),
            Some(RecordedEvent::Loaded(LoadedEvent { degraded: true, .. }))
        ));

        sink.clear();
        let _ = page.advance(HostTime::from_millis(205), &mut Tracer::new(&mut sink));
        assert!(matches!(sink.events(), [RecordedEvent::Reveal(_)]));
    }

    #[test]
    fn throttled_scroll_records_dropped_calls() {
        let mut page = degraded_page();
        let mut sink = RecorderSink::new();
        let snapshot = ScrollSnapshot {
            scroll_y: 120.0,
            document_height: 3000.0,
            viewport_height: 800.0,
        };
        for ms in [1_000, 1_020] {
            let _ = page.dispatch(
                Signal::Scroll(snapshot),
                HostTime::from_millis(ms),
                &NoLayout,
                &mut Tracer::new(&mut sink),
            );
        }
        let chrome: Vec<bool> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Handler(h) if h.handler == Handler::ScrollChrome => Some(h.admitted),
                _ => None,
            })
            .collect();
        assert_eq!(chrome, [true, false]);

        let mut pretty = PrettyPrintSink::with_writer(Vec::<u8>::new()).show_dropped(true);
        sink.replay(&mut pretty);
        let output = String::from_utf8(pretty.into_inner()).unwrap();
        assert_eq!(output.lines().count(), sink.events().len());
    }
}
