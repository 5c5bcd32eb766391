// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes one JSON object per event. Every object carries
//! `"event"` (the event kind) and `"ts_ms"` (host time in milliseconds); the
//! remaining keys depend on the kind.

use std::io::Write;

use serde_json::{Value, json};

use glint_core::element::ElementId;
use glint_core::trace::{
    CounterEvent, CounterPhase, FormEvent, HandlerEvent, LightboxEvent, LightboxTransition,
    LoadedEvent, MenuEvent, RevealEvent, TraceSink, VisibleEvent,
};

/// Writes newline-delimited JSON trace events.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, value: &Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

fn element(id: ElementId) -> u32 {
    id.index()
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_handler(&mut self, e: &HandlerEvent) {
        self.emit(&json!({
            "event": "handler",
            "ts_ms": e.at.as_millis_f64(),
            "handler": format!("{:?}", e.handler),
            "source": format!("{:?}", e.source),
            "admitted": e.admitted,
        }));
    }

    fn on_visible(&mut self, e: &VisibleEvent) {
        self.emit(&json!({
            "event": "visible",
            "ts_ms": e.at.as_millis_f64(),
            "watcher": format!("{:?}", e.watcher),
            "element": element(e.element),
            "degraded": e.degraded,
        }));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.emit(&json!({
            "event": "reveal",
            "ts_ms": e.at.as_millis_f64(),
            "element": element(e.element),
        }));
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        let (phase, args) = match e.phase {
            CounterPhase::Scheduled { delay } => {
                ("scheduled", json!({ "delay_ms": delay.as_millis_f64() }))
            }
            CounterPhase::Started { target } => ("started", json!({ "target": target })),
            CounterPhase::Finished { value } => ("finished", json!({ "value": value })),
        };
        self.emit(&json!({
            "event": "counter",
            "ts_ms": e.at.as_millis_f64(),
            "watcher": format!("{:?}", e.watcher),
            "element": element(e.element),
            "phase": phase,
            "args": args,
        }));
    }

    fn on_lightbox(&mut self, e: &LightboxEvent) {
        let (transition, trigger) = match e.transition {
            LightboxTransition::Opened => ("opened", Value::Null),
            LightboxTransition::Replaced => ("replaced", Value::Null),
            LightboxTransition::Closed(t) => ("closed", Value::String(format!("{t:?}"))),
        };
        self.emit(&json!({
            "event": "lightbox",
            "ts_ms": e.at.as_millis_f64(),
            "transition": transition,
            "trigger": trigger,
        }));
    }

    fn on_form(&mut self, e: &FormEvent) {
        self.emit(&json!({
            "event": "form",
            "ts_ms": e.at.as_millis_f64(),
            "from": format!("{:?}", e.from),
            "to": format!("{:?}", e.to),
            "errors": e.errors,
        }));
    }

    fn on_menu(&mut self, e: &MenuEvent) {
        self.emit(&json!({
            "event": "menu",
            "ts_ms": e.at.as_millis_f64(),
            "open": e.open,
        }));
    }

    fn on_loaded(&mut self, e: &LoadedEvent) {
        self.emit(&json!({
            "event": "loaded",
            "ts_ms": e.at.as_millis_f64(),
            "elements": e.elements,
            "degraded": e.degraded,
        }));
    }
}
