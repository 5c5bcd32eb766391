// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting a [`Page`] on the live document.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, Node};

use glint_core::backend::Presenter as _;
use glint_core::config::PageConfig;
use glint_core::page::{Page, Response, ScrollRequest, delay_until};
use glint_core::registry::{Click, Key, Signal, WatcherKind};
use glint_core::time::HostTime;
use glint_core::trace::{TraceSink, Tracer};
use glint_core::visibility::{Availability, ObservationEntry};

use crate::dom::{Bindings, scan};
use crate::layout::{WebLayout, client_point};
use crate::observer::{self, Observer, RawEntry};
use crate::presenter::{DomPresenter, control_value};
use crate::raf::{AnimationFrame, millis_to_host};
use crate::timer::Timeout;

type Shared = Rc<RefCell<Runtime>>;

/// The page plus the browser resources that drive it.
struct Runtime {
    page: Page,
    presenter: DomPresenter,
    layout: WebLayout,
    observers: [Option<Observer>; 3],
    timer: Timeout,
    frame: AnimationFrame,
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Runtime")
            .field("page", &self.page)
            .field("timer", &self.timer)
            .field("frame", &self.frame)
            .field("traced", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

const fn slot(kind: WatcherKind) -> usize {
    match kind {
        WatcherKind::Reveal => 0,
        WatcherKind::HeroCounter => 1,
        WatcherKind::GridCounter => 2,
    }
}

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink.as_deref_mut() {
        Some(sink) => Tracer::new(sink),
        None => Tracer::none(),
    }
}

impl Runtime {
    /// Observes every watched element and delivers the load signal.
    fn start(&mut self) {
        let now = crate::now();
        let response = self.page.mount(now, &self.layout, &mut tracer(&mut self.sink));
        for kind in WatcherKind::ALL {
            let Some(observer) = &self.observers[slot(kind)] else {
                continue;
            };
            for &id in self.page.watcher(kind).observing() {
                if let Some(el) = self.presenter.get_element(id.index()) {
                    observer.observe(el);
                }
            }
        }
        self.settle(now, response, None);
    }

    fn dispatch(&mut self, signal: Signal, event: Option<&Event>) {
        let now = crate::now();
        let response = self
            .page
            .dispatch(signal, now, &self.layout, &mut tracer(&mut self.sink));
        self.settle(now, response, event);
    }

    fn on_timer(&mut self) {
        let now = crate::now();
        let response = self.page.advance(now, &mut tracer(&mut self.sink));
        self.settle(now, response, None);
    }

    fn on_frame(&mut self, now: HostTime) {
        self.page.frame(now, &mut tracer(&mut self.sink));
        self.settle(now, Response::default(), None);
    }

    fn on_entries(&mut self, watcher: WatcherKind, batch: Vec<RawEntry>) {
        let entries = batch
            .into_iter()
            .filter_map(|raw| {
                Some(ObservationEntry {
                    element: self.layout.id_of(&raw.target)?,
                    is_intersecting: raw.is_intersecting,
                    ratio: raw.ratio,
                    time: millis_to_host(raw.time_ms),
                })
            })
            .collect();
        self.dispatch(Signal::Visibility { watcher, entries }, None);
    }

    /// Performs `response`, presents changes, and re-arms the pump.
    fn settle(&mut self, now: HostTime, response: Response, event: Option<&Event>) {
        if response.prevent_default
            && let Some(event) = event
        {
            event.prevent_default();
        }
        for (kind, id) in response.unobserve {
            if let (Some(observer), Some(el)) = (
                &self.observers[slot(kind)],
                self.presenter.get_element(id.index()),
            ) {
                observer.unobserve(el);
            }
        }

        let changes = self.page.evaluate();
        if !changes.is_empty() {
            self.presenter.apply(self.page.store(), &changes);
        }

        match response.scroll {
            Some(ScrollRequest::To(top)) => {
                let options = web_sys::ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(web_sys::ScrollBehavior::Smooth);
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_scroll_to_options(&options);
                }
            }
            Some(ScrollRequest::IntoView(id)) => {
                if let Some(el) = self.presenter.get_element(id.index()) {
                    let options = web_sys::ScrollIntoViewOptions::new();
                    options.set_behavior(web_sys::ScrollBehavior::Smooth);
                    options.set_block(web_sys::ScrollLogicalPosition::Nearest);
                    el.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
            None => {}
        }

        match self.page.next_deadline() {
            Some(deadline) => self.timer.arm(delay_until(now, deadline)),
            None => self.timer.clear(),
        }
        if self.page.wants_frame() {
            self.frame.request();
        }
    }
}

/// Runs `f` on the runtime unless it is gone or already borrowed.
fn with_runtime(runtime: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut Runtime)) {
    let Some(runtime) = runtime.upgrade() else {
        return;
    };
    let Ok(mut runtime) = runtime.try_borrow_mut() else {
        return;
    };
    f(&mut runtime);
}

/// Mounts the page behaviours on the current document.
///
/// Missing markup disables the behaviour that needs it. Browsers without
/// `IntersectionObserver` reveal and count everything at load.
pub fn mount(config: PageConfig) -> Result<(), JsValue> {
    mount_inner(config, None)
}

/// Like [`mount`], reporting orchestration events to `sink`.
///
/// Events are only emitted when `glint_core` is built with its `trace`
/// feature (forwarded by this crate's `trace` feature).
pub fn mount_with_sink(config: PageConfig, sink: Box<dyn TraceSink>) -> Result<(), JsValue> {
    mount_inner(config, Some(sink))
}

fn mount_inner(config: PageConfig, sink: Option<Box<dyn TraceSink>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let scan = scan(&document)?;
    let availability = if observer::is_supported(&window) {
        Availability::Available
    } else {
        Availability::Degraded
    };
    let page = Page::new(config, scan.store, scan.markup, availability);
    let presenter = DomPresenter::new(scan.elements.clone());
    let layout = WebLayout::new(window.clone(), document.clone(), scan.elements);

    let runtime: Shared = Rc::new_cyclic(|weak| {
        let on_timer = weak.clone();
        let on_frame = weak.clone();
        RefCell::new(Runtime {
            page,
            presenter,
            layout,
            observers: [None, None, None],
            timer: Timeout::new(move || with_runtime(&on_timer, Runtime::on_timer)),
            frame: AnimationFrame::new(move |now| with_runtime(&on_frame, |rt| rt.on_frame(now))),
            sink,
        })
    });

    if availability == Availability::Available {
        for kind in WatcherKind::ALL {
            let weak = Rc::downgrade(&runtime);
            let options = runtime.borrow().page.watcher(kind).options();
            let observer = Observer::new(options, move |batch| {
                with_runtime(&weak, |rt| rt.on_entries(kind, batch));
            })?;
            runtime.borrow_mut().observers[slot(kind)] = Some(observer);
        }
    }

    runtime.borrow_mut().start();
    bind(&runtime, &window, &document, scan.bindings)?;
    Ok(())
}

/// Adds a listener holding a strong reference to the runtime.
///
/// Listeners live as long as the document, so their closures are leaked.
fn listen(
    target: &EventTarget,
    kind: &str,
    runtime: &Shared,
    mut f: impl FnMut(&mut Runtime, &Event) + 'static,
) -> Result<(), JsValue> {
    let runtime = Rc::clone(runtime);
    let cb = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(mut rt) = runtime.try_borrow_mut() {
            f(&mut rt, &event);
        }
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn click(
    target: &EventTarget,
    runtime: &Shared,
    mut f: impl FnMut(&Event) -> Click + 'static,
) -> Result<(), JsValue> {
    listen(target, "click", runtime, move |rt, event| {
        let click = f(event);
        rt.dispatch(Signal::Click(click), Some(event));
    })
}

fn bind(
    runtime: &Shared,
    window: &web_sys::Window,
    document: &web_sys::Document,
    bindings: Bindings,
) -> Result<(), JsValue> {
    listen(window, "scroll", runtime, |rt, _| {
        let snapshot = rt.layout.snapshot();
        rt.dispatch(Signal::Scroll(snapshot), None);
    })?;
    listen(window, "mousemove", runtime, |rt, event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let signal = Signal::PointerMove {
            pointer: client_point(mouse.client_x(), mouse.client_y()),
            viewport: rt.layout.viewport(),
        };
        rt.dispatch(signal, None);
    })?;

    // Element listeners before the document ones, matching bubbling order.
    if let Some(hamburger) = &bindings.hamburger {
        click(hamburger, runtime, |_| Click::Hamburger)?;
    }
    for link in &bindings.nav_links {
        click(link, runtime, |_| Click::NavLink)?;
    }
    for (anchor, target) in bindings.anchors {
        click(&anchor, runtime, move |_| Click::Anchor { target })?;
    }
    if let Some(back) = &bindings.back_to_top {
        click(back, runtime, |_| Click::BackToTop)?;
    }
    for item in bindings.gallery {
        let source = item.clone();
        click(&item, runtime, move |_| Click::GalleryItem {
            caption: source
                .query_selector(".gallery-overlay span")
                .ok()
                .flatten()
                .and_then(|span| span.text_content()),
        })?;
    }
    if let Some(lightbox) = bindings.lightbox {
        click(&lightbox.close, runtime, |_| Click::LightboxClose)?;
        let overlay = lightbox.overlay.clone();
        click(&lightbox.overlay, runtime, move |event| Click::Lightbox {
            on_backdrop: event
                .target()
                .is_some_and(|t| t.dyn_ref::<HtmlElement>() == Some(&overlay)),
        })?;
    }

    for (control, element) in bindings.controls {
        let source = element.clone();
        listen(&element, "input", runtime, move |rt, _| {
            let value = control_value(&source).unwrap_or_default();
            rt.dispatch(Signal::Input { control, value }, None);
        })?;
    }
    if let Some(form) = &bindings.form {
        listen(form, "submit", runtime, |rt, event| {
            rt.dispatch(Signal::Submit, Some(event));
        })?;
    }

    for (card, id) in bindings.cards {
        listen(&card, "mousemove", runtime, move |rt, event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = client_point(mouse.client_x(), mouse.client_y());
            rt.dispatch(Signal::CardPointer { card: id, pointer }, None);
        })?;
        listen(&card, "mouseleave", runtime, move |rt, _| {
            rt.dispatch(Signal::CardLeave { card: id }, None);
        })?;
    }

    let navbar = bindings.navbar;
    click(document, runtime, move |event| Click::Document {
        inside_navbar: navbar.as_ref().is_some_and(|nav| {
            let target = event.target();
            nav.contains(target.as_ref().and_then(|t| t.dyn_ref::<Node>()))
        }),
    })?;
    listen(document, "keydown", runtime, |rt, event| {
        let key = match event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            Some(k) if k == "Escape" => Key::Escape,
            _ => Key::Other,
        };
        rt.dispatch(Signal::Key(key), None);
    })?;

    Ok(())
}
