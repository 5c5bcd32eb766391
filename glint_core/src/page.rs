// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page: every controller wired to one element store and task queue.
//!
//! A [`Page`] is built once from a [`PageMarkup`] (the handles a backend
//! resolved from the document) and then driven by three entry points:
//!
//! - [`dispatch`](Page::dispatch) for signals,
//! - [`advance`](Page::advance) when the platform timer fires,
//! - [`frame`](Page::frame) before each repaint.
//!
//! After any of them, [`evaluate`](Page::evaluate) yields the element
//! changes to present, and [`next_deadline`](Page::next_deadline) /
//! [`wants_frame`](Page::wants_frame) tell the backend how to re-arm its
//! timer and frame callback.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::backend::Layout;
use crate::config::PageConfig;
use crate::counter::{CounterController, CounterStart, RunId};
use crate::element::{ElementChanges, ElementId, ElementStore, Transform};
use crate::form::{FormController, FormElements, FormState, SubmitOutcome};
use crate::lightbox::{CloseTrigger, LightboxController, LightboxElements, OpenOutcome};
use crate::menu::{LockHolder, NavMenu, ScrollLock};
use crate::parallax::{PointerParallaxTracker, card_tilt};
use crate::registry::{Click, Handler, Key, Registry, Signal, WatcherKind};
use crate::reveal::RevealController;
use crate::schedule::TaskQueue;
use crate::scroll::{ScrollTracker, Section};
use crate::time::{Duration, HostTime};
use crate::trace::{
    CounterEvent, CounterPhase, FormEvent, HandlerEvent, LightboxEvent, LightboxTransition,
    LoadedEvent, MenuEvent, RevealEvent, Tracer, VisibleEvent,
};
use crate::typewriter::Typewriter;
use crate::visibility::{Availability, VisibilityWatcher};

/// Element handles resolved from the document. Anything missing is `None`
/// or empty, and the behaviour that needs it does nothing.
#[derive(Clone, Debug, Default)]
pub struct PageMarkup {
    /// Document body (scroll lock).
    pub body: Option<ElementId>,
    /// Fixed navbar.
    pub navbar: Option<ElementId>,
    /// Hamburger control.
    pub hamburger: Option<ElementId>,
    /// Navigation link list.
    pub nav_links: Option<ElementId>,
    /// Back-to-top control.
    pub back_to_top: Option<ElementId>,
    /// Reading-progress bar.
    pub progress: Option<ElementId>,
    /// Hero badge retyped at load.
    pub hero_badge: Option<ElementId>,
    /// Sections with their navigation links, in document order.
    pub sections: Vec<Section>,
    /// Scroll-reveal elements.
    pub reveal: Vec<ElementId>,
    /// Hero counters.
    pub hero_counters: Vec<ElementId>,
    /// Statistics grid counters.
    pub grid_counters: Vec<ElementId>,
    /// Parallax shapes, in document order.
    pub shapes: Vec<ElementId>,
    /// Lightbox parts.
    pub lightbox: Option<LightboxElements>,
    /// Form parts.
    pub form: FormElements,
}

/// A scroll the backend should perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRequest {
    /// Smooth-scroll the document to a vertical offset.
    To(f64),
    /// Smooth-scroll the nearest edge of an element into view.
    IntoView(ElementId),
}

/// Side effects the backend performs after a page entry point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// Suppress the platform's default action for the event.
    pub prevent_default: bool,
    /// Scroll to perform.
    pub scroll: Option<ScrollRequest>,
    /// Elements each watcher's primitive should stop observing.
    pub unobserve: Vec<(WatcherKind, ElementId)>,
}

#[derive(Clone, Copy, Debug)]
enum Task {
    Reveal(ElementId),
    StartCounter(WatcherKind, ElementId),
    CompleteSubmission,
    Type,
}

/// One step of a running counter, stepped before the next repaint.
#[derive(Clone, Copy, Debug)]
struct CounterFrame {
    watcher: WatcherKind,
    run: RunId,
}

/// Orchestrates every page behaviour.
#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    store: ElementStore,
    queue: TaskQueue<Task, CounterFrame>,
    registry: Registry,
    availability: Availability,

    reveal_watcher: VisibilityWatcher,
    hero_watcher: VisibilityWatcher,
    grid_watcher: VisibilityWatcher,
    reveal: RevealController,
    hero: CounterController,
    grid: CounterController,

    scroll: ScrollTracker,
    parallax: PointerParallaxTracker,
    menu: NavMenu,
    lock: ScrollLock,
    lightbox: LightboxController,
    form: FormController,
    success: Option<ElementId>,
    hero_badge: Option<ElementId>,
    typewriter: Option<Typewriter>,

    pending: PendingObservation,
}

#[derive(Clone, Debug, Default)]
struct PendingObservation {
    reveal: Vec<ElementId>,
    hero: Vec<ElementId>,
    grid: Vec<ElementId>,
}

impl Page {
    /// Builds a page over `store` with the standard registration table.
    ///
    /// Watchers are created but observe nothing until [`mount`](Self::mount).
    #[must_use]
    pub fn new(
        config: PageConfig,
        store: ElementStore,
        markup: PageMarkup,
        availability: Availability,
    ) -> Self {
        Self {
            registry: Registry::standard(&config),
            queue: TaskQueue::new(),
            availability,
            reveal_watcher: VisibilityWatcher::new(config.reveal, availability),
            hero_watcher: VisibilityWatcher::new(config.hero.observer, availability),
            grid_watcher: VisibilityWatcher::new(config.grid.observer, availability),
            reveal: RevealController::new(),
            hero: CounterController::new(config.hero),
            grid: CounterController::new(config.grid),
            scroll: ScrollTracker::new(
                config.scroll,
                markup.navbar,
                markup.back_to_top,
                markup.progress,
                markup.sections,
            ),
            parallax: PointerParallaxTracker::new(markup.shapes, config.parallax_step_px),
            menu: NavMenu::new(markup.hamburger, markup.nav_links),
            lock: ScrollLock::new(markup.body),
            lightbox: LightboxController::new(markup.lightbox),
            success: markup.form.success,
            form: FormController::new(markup.form),
            hero_badge: markup.hero_badge,
            typewriter: None,
            pending: PendingObservation {
                reveal: markup.reveal,
                hero: markup.hero_counters,
                grid: markup.grid_counters,
            },
            store,
            config,
        }
    }

    /// Starts observing every watched element and delivers the load signal.
    ///
    /// Degraded watchers fire all their elements here.
    pub fn mount(&mut self, now: HostTime, layout: &dyn Layout, tracer: &mut Tracer<'_>) -> Response {
        let pending = core::mem::take(&mut self.pending);
        for (kind, elements) in [
            (WatcherKind::Reveal, pending.reveal),
            (WatcherKind::HeroCounter, pending.hero),
            (WatcherKind::GridCounter, pending.grid),
        ] {
            let immediate = self.watcher_mut(kind).observe(elements);
            for el in immediate {
                self.on_visible(kind, el, now, true, tracer);
            }
        }
        self.dispatch(Signal::Loaded, now, layout, tracer)
    }

    // -- Accessors --

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The element store.
    #[must_use]
    pub const fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The registration table.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A visibility watcher.
    #[must_use]
    pub const fn watcher(&self, kind: WatcherKind) -> &VisibilityWatcher {
        match kind {
            WatcherKind::Reveal => &self.reveal_watcher,
            WatcherKind::HeroCounter => &self.hero_watcher,
            WatcherKind::GridCounter => &self.grid_watcher,
        }
    }

    fn watcher_mut(&mut self, kind: WatcherKind) -> &mut VisibilityWatcher {
        match kind {
            WatcherKind::Reveal => &mut self.reveal_watcher,
            WatcherKind::HeroCounter => &mut self.hero_watcher,
            WatcherKind::GridCounter => &mut self.grid_watcher,
        }
    }

    /// The lightbox.
    #[must_use]
    pub const fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    /// The navigation menu.
    #[must_use]
    pub const fn menu(&self) -> &NavMenu {
        &self.menu
    }

    /// The document scroll lock.
    #[must_use]
    pub const fn scroll_lock(&self) -> &ScrollLock {
        &self.lock
    }

    /// The form.
    #[must_use]
    pub const fn form(&self) -> &FormController {
        &self.form
    }

    // -- Pump --

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.queue.next_deadline()
    }

    /// Returns `true` while a frame callback is pending.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.queue.has_frame_requests()
    }

    /// Drains accumulated element changes.
    pub fn evaluate(&mut self) -> ElementChanges {
        self.store.evaluate()
    }

    /// Routes `signal` through the registration table.
    pub fn dispatch(
        &mut self,
        signal: Signal,
        now: HostTime,
        layout: &dyn Layout,
        tracer: &mut Tracer<'_>,
    ) -> Response {
        let source = signal.source();
        let mut response = Response::default();
        for i in 0..self.registry.len() {
            let Some((handler, admitted)) = self.registry.admit(i, source, now) else {
                continue;
            };
            tracer.handler(&HandlerEvent {
                handler,
                source,
                at: now,
                admitted,
            });
            if admitted {
                self.run(handler, &signal, now, layout, tracer, &mut response);
            }
        }
        response
    }

    /// Runs every timer due at `now`, in deadline order.
    pub fn advance(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Response {
        let mut response = Response::default();
        while let Some(task) = self.queue.pop_due(now) {
            match task {
                Task::Reveal(el) => {
                    if self.reveal.reveal(&mut self.store, el) {
                        tracer.reveal(&RevealEvent { element: el, at: now });
                    }
                }
                Task::StartCounter(kind, el) => self.start_counter(kind, el, now, tracer),
                Task::CompleteSubmission => {
                    let from = self.form.state();
                    if self.form.complete(&mut self.store) {
                        self.trace_form(from, now, tracer);
                        response.scroll = self.success.map(ScrollRequest::IntoView);
                    }
                }
                Task::Type => {
                    let more = self
                        .typewriter
                        .as_mut()
                        .is_some_and(|tw| tw.step(&mut self.store));
                    if more {
                        self.queue
                            .set_timeout(now, self.config.typewriter_step, Task::Type);
                    }
                }
            }
        }
        response
    }

    /// Runs the frame callbacks requested before this frame.
    pub fn frame(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        for frame in self.queue.take_frame_requests() {
            let CounterFrame { watcher: kind, run } = frame;
            let Some(counter) = self.counter_mut(kind) else {
                continue;
            };
            let Some(step) = counter.step(run, now) else {
                continue;
            };
            let Some(element) = counter.run(run).map(|r| r.element()) else {
                continue;
            };
            self.store.set_text(element, step.value.to_string());
            if step.finished {
                tracer.counter(&CounterEvent {
                    watcher: kind,
                    element,
                    at: now,
                    phase: CounterPhase::Finished { value: step.value },
                });
            } else {
                self.queue.request_frame(frame);
            }
        }
    }

    // -- Handlers --

    fn run(
        &mut self,
        handler: Handler,
        signal: &Signal,
        now: HostTime,
        layout: &dyn Layout,
        tracer: &mut Tracer<'_>,
        response: &mut Response,
    ) {
        match (handler, signal) {
            (Handler::ScrollChrome, Signal::Scroll(snapshot)) => {
                let _ = self.scroll.update_chrome(&mut self.store, snapshot);
            }
            (Handler::SectionHighlight, Signal::Scroll(snapshot)) => {
                let _ = self
                    .scroll
                    .update_highlight(&mut self.store, snapshot.scroll_y, layout);
            }
            (Handler::Parallax, Signal::PointerMove { pointer, viewport }) => {
                let _ = self.parallax.update(&mut self.store, *pointer, *viewport);
            }
            (Handler::Visibility, Signal::Visibility { watcher, entries }) => {
                let fired = self.watcher_mut(*watcher).deliver(entries);
                for el in fired {
                    response.unobserve.push((*watcher, el));
                    self.on_visible(*watcher, el, now, false, tracer);
                }
            }
            (Handler::Interaction, Signal::Click(click)) => {
                self.on_click(click, now, layout, tracer, response);
            }
            (Handler::Interaction, Signal::Key(Key::Escape)) => {
                self.close_lightbox(CloseTrigger::Escape, now, tracer);
            }
            (Handler::Form, Signal::Input { control, value }) => {
                let from = self.form.state();
                self.form.input(&mut self.store, *control, value.as_str());
                if self.form.state() != from {
                    self.trace_form(from, now, tracer);
                }
            }
            (Handler::Form, Signal::Submit) => {
                response.prevent_default = true;
                let from = self.form.state();
                match self.form.submit(&mut self.store) {
                    SubmitOutcome::Ignored => return,
                    SubmitOutcome::Rejected(_) => {}
                    SubmitOutcome::Started => {
                        self.queue
                            .set_timeout(now, self.config.submit_delay, Task::CompleteSubmission);
                    }
                }
                self.trace_form(from, now, tracer);
            }
            (Handler::CardTilt, Signal::CardPointer { card, pointer }) => {
                if let Some(rect) = layout.client_rect(*card) {
                    let tilt = card_tilt(*pointer, rect, self.config.tilt);
                    self.store.set_transform(*card, Transform::Tilt(tilt));
                }
            }
            (Handler::CardTilt, Signal::CardLeave { card }) => {
                self.store.set_transform(*card, Transform::None);
            }
            (Handler::Startup, Signal::Loaded) => {
                if let Some(badge) = self.hero_badge {
                    self.typewriter = Some(Typewriter::start(&mut self.store, badge));
                    self.queue
                        .set_timeout(now, self.config.typewriter_start, Task::Type);
                }
                tracer.loaded(&LoadedEvent {
                    at: now,
                    elements: self.store.len(),
                    degraded: self.availability == Availability::Degraded,
                });
            }
            _ => {}
        }
    }

    fn on_click(
        &mut self,
        click: &Click,
        now: HostTime,
        layout: &dyn Layout,
        tracer: &mut Tracer<'_>,
        response: &mut Response,
    ) {
        match click {
            Click::Hamburger => {
                let open = self.menu.toggle(&mut self.store);
                self.lock.set(&mut self.store, LockHolder::Menu, open);
                tracer.menu(&MenuEvent { at: now, open });
            }
            Click::NavLink | Click::Document { inside_navbar: false } => {
                if self.menu.close(&mut self.store) {
                    self.lock.set(&mut self.store, LockHolder::Menu, false);
                    tracer.menu(&MenuEvent { at: now, open: false });
                }
            }
            Click::Document { inside_navbar: true } => {}
            Click::Anchor { target } => {
                if let Some(rect) = target.and_then(|t| layout.document_rect(t)) {
                    response.prevent_default = true;
                    response.scroll = Some(ScrollRequest::To(rect.y0 - self.config.anchor_offset));
                }
            }
            Click::BackToTop => response.scroll = Some(ScrollRequest::To(0.0)),
            Click::GalleryItem { caption } => {
                let caption = caption
                    .clone()
                    .unwrap_or_else(|| String::from(self.config.gallery_caption));
                let outcome = self
                    .lightbox
                    .open(&mut self.store, caption, self.config.gallery_icon);
                self.lock.set(&mut self.store, LockHolder::Lightbox, true);
                tracer.lightbox(&LightboxEvent {
                    at: now,
                    transition: match outcome {
                        OpenOutcome::Opened => LightboxTransition::Opened,
                        OpenOutcome::Replaced => LightboxTransition::Replaced,
                    },
                });
            }
            Click::LightboxClose => self.close_lightbox(CloseTrigger::CloseButton, now, tracer),
            Click::Lightbox { on_backdrop } => {
                if *on_backdrop {
                    self.close_lightbox(CloseTrigger::Backdrop, now, tracer);
                }
            }
        }
    }

    fn close_lightbox(&mut self, trigger: CloseTrigger, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.lightbox.close(&mut self.store) {
            self.lock.set(&mut self.store, LockHolder::Lightbox, false);
            tracer.lightbox(&LightboxEvent {
                at: now,
                transition: LightboxTransition::Closed(trigger),
            });
        }
    }

    fn on_visible(
        &mut self,
        kind: WatcherKind,
        element: ElementId,
        now: HostTime,
        degraded: bool,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.visible(&VisibleEvent {
            watcher: kind,
            element,
            at: now,
            degraded,
        });
        if kind == WatcherKind::Reveal {
            let delay = RevealController::delay_for(self.store.attributes(element));
            self.queue.set_timeout(now, delay, Task::Reveal(element));
            return;
        }
        let attrs = self.store.attributes(element);
        let start = match kind {
            WatcherKind::HeroCounter => self.hero.on_became_visible(element, attrs),
            WatcherKind::GridCounter => self.grid.on_became_visible(element, attrs),
            WatcherKind::Reveal => None,
        };
        match start {
            None => {}
            Some(CounterStart::Now) => self.start_counter(kind, element, now, tracer),
            Some(CounterStart::After(delay)) => {
                tracer.counter(&CounterEvent {
                    watcher: kind,
                    element,
                    at: now,
                    phase: CounterPhase::Scheduled { delay },
                });
                self.queue
                    .set_timeout(now, delay, Task::StartCounter(kind, element));
            }
        }
    }

    fn start_counter(
        &mut self,
        kind: WatcherKind,
        element: ElementId,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        let attrs = self.store.attributes(element);
        let run = match kind {
            WatcherKind::HeroCounter => self.hero.start(element, attrs, now),
            WatcherKind::GridCounter => self.grid.start(element, attrs, now),
            WatcherKind::Reveal => return,
        };
        tracer.counter(&CounterEvent {
            watcher: kind,
            element,
            at: now,
            phase: CounterPhase::Started {
                target: attrs.target(),
            },
        });
        self.queue.request_frame(CounterFrame { watcher: kind, run });
    }

    fn counter_mut(&mut self, kind: WatcherKind) -> Option<&mut CounterController> {
        match kind {
            WatcherKind::HeroCounter => Some(&mut self.hero),
            WatcherKind::GridCounter => Some(&mut self.grid),
            WatcherKind::Reveal => None,
        }
    }

    fn trace_form(&self, from: FormState, now: HostTime, tracer: &mut Tracer<'_>) {
        tracer.form(&FormEvent {
            at: now,
            from,
            to: self.form.state(),
            errors: self.form.errors().len(),
        });
    }
}

/// Time until `deadline`, saturating at zero.
#[must_use]
pub fn delay_until(now: HostTime, deadline: HostTime) -> Duration {
    deadline.saturating_duration_since(now)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::backend::NoLayout;
    use crate::element::{Attributes, Class, Highlight};
    use crate::form::Field;
    use crate::scroll::ScrollSnapshot;
    use crate::visibility::ObservationEntry;

    struct Fixture {
        page: Page,
        ids: Ids,
    }

    #[derive(Clone, Copy)]
    struct Ids {
        body: ElementId,
        navbar: ElementId,
        hamburger: ElementId,
        nav_links: ElementId,
        back_to_top: ElementId,
        progress: ElementId,
        badge: ElementId,
        home: ElementId,
        about: ElementId,
        home_link: ElementId,
        about_link: ElementId,
        card: ElementId,
        hero_stat: ElementId,
        grid_stat: ElementId,
        shape: ElementId,
        overlay: ElementId,
        caption: ElementId,
    }

    /// Sections A:[0,300) and B:[300,900) in document space.
    struct TestLayout {
        scroll_y: f64,
        ids: Ids,
    }

    impl Layout for TestLayout {
        fn client_rect(&self, element: ElementId) -> Option<Rect> {
            let doc = if element == self.ids.home {
                Rect::new(0.0, 0.0, 1000.0, 300.0)
            } else if element == self.ids.about {
                Rect::new(0.0, 300.0, 1000.0, 900.0)
            } else if element == self.ids.card {
                Rect::new(100.0, 400.0, 300.0, 500.0)
            } else {
                return None;
            };
            Some(Rect::new(doc.x0, doc.y0 - self.scroll_y, doc.x1, doc.y1 - self.scroll_y))
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }
    }

    fn fixture(availability: Availability) -> Fixture {
        let mut store = ElementStore::new();
        let ids = Ids {
            body: store.register("body"),
            navbar: store.register("navbar"),
            hamburger: store.register("hamburger"),
            nav_links: store.register("navLinks"),
            back_to_top: store.register("backToTop"),
            progress: store.register("scrollProgress"),
            badge: store.register("heroBadge"),
            home: store.register("home"),
            about: store.register("about"),
            home_link: store.register("a[href='#home']"),
            about_link: store.register("a[href='#about']"),
            card: store.register_with("card", Attributes::with_delay("150")),
            hero_stat: store.register_with("hero-stat", Attributes::with_target("250")),
            grid_stat: store.register_with(
                "stat",
                Attributes {
                    delay: Some("300".into()),
                    target: Some("98".into()),
                },
            ),
            shape: store.register("shape-1"),
            overlay: store.register("lightbox"),
            caption: store.register("lightboxCaption"),
        };
        store.set_text(ids.badge, "Hi");
        let markup = PageMarkup {
            body: Some(ids.body),
            navbar: Some(ids.navbar),
            hamburger: Some(ids.hamburger),
            nav_links: Some(ids.nav_links),
            back_to_top: Some(ids.back_to_top),
            progress: Some(ids.progress),
            hero_badge: Some(ids.badge),
            sections: alloc::vec![
                Section {
                    element: ids.home,
                    link: Some(ids.home_link),
                },
                Section {
                    element: ids.about,
                    link: Some(ids.about_link),
                },
            ],
            reveal: alloc::vec![ids.card],
            hero_counters: alloc::vec![ids.hero_stat],
            grid_counters: alloc::vec![ids.grid_stat],
            shapes: alloc::vec![ids.shape],
            lightbox: Some(LightboxElements {
                overlay: ids.overlay,
                caption: Some(ids.caption),
                icon: None,
            }),
            form: FormElements::default(),
        };
        let page = Page::new(PageConfig::standard(), store, markup, availability);
        Fixture { page, ids }
    }

    fn visible(el: ElementId, at: HostTime) -> ObservationEntry {
        ObservationEntry {
            element: el,
            is_intersecting: true,
            ratio: 1.0,
            time: at,
        }
    }

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    #[test]
    fn reveal_waits_for_declared_delay_and_fires_once() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let _ = page.mount(ms(0), &NoLayout, &mut tracer);
        assert!(page.watcher(WatcherKind::Reveal).is_observing(ids.card));

        let signal = Signal::Visibility {
            watcher: WatcherKind::Reveal,
            entries: alloc::vec![visible(ids.card, ms(1_000))],
        };
        let r = page.dispatch(signal.clone(), ms(1_000), &NoLayout, &mut tracer);
        assert_eq!(r.unobserve, [(WatcherKind::Reveal, ids.card)]);

        // Same signal again: already fired, nothing new.
        let r = page.dispatch(signal, ms(1_010), &NoLayout, &mut tracer);
        assert!(r.unobserve.is_empty());

        let _ = page.advance(ms(1_149), &mut tracer);
        assert!(!page.store().has_class(ids.card, Class::Revealed));
        let _ = page.advance(ms(1_150), &mut tracer);
        assert!(page.store().has_class(ids.card, Class::Revealed));
    }

    #[test]
    fn degraded_watchers_fire_at_mount() {
        let Fixture { mut page, ids } = fixture(Availability::Degraded);
        let mut tracer = Tracer::none();
        let _ = page.mount(ms(0), &NoLayout, &mut tracer);

        // Hero counter starts immediately; grid waits 300ms; reveal 150ms.
        assert!(page.wants_frame());
        let _ = page.advance(ms(300), &mut tracer);
        assert!(page.store().has_class(ids.card, Class::Revealed));

        let mut t = 300;
        while page.wants_frame() {
            t += 16;
            page.frame(ms(t), &mut tracer);
            let _ = page.advance(ms(t), &mut tracer);
        }
        assert_eq!(page.store().text(ids.hero_stat), Some("250"));
        assert_eq!(page.store().text(ids.grid_stat), Some("98"));
    }

    #[test]
    fn counter_frames_are_monotonic() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let _ = page.mount(ms(0), &NoLayout, &mut tracer);
        let _ = page.dispatch(
            Signal::Visibility {
                watcher: WatcherKind::HeroCounter,
                entries: alloc::vec![visible(ids.hero_stat, ms(10))],
            },
            ms(10),
            &NoLayout,
            &mut tracer,
        );

        let mut last = 0;
        let mut t = 10;
        while page.wants_frame() {
            t += 16;
            page.frame(ms(t), &mut tracer);
            let shown: u64 = page
                .store()
                .text(ids.hero_stat)
                .and_then(|s| s.parse().ok())
                .expect("counter text");
            assert!(shown >= last);
            last = shown;
        }
        assert_eq!(last, 250);
        assert!(t >= 2_210);
    }

    #[test]
    fn scroll_passes_throttle_independently() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let mut layout = TestLayout {
            scroll_y: 250.0,
            ids,
        };
        let snap = |y| {
            Signal::Scroll(ScrollSnapshot {
                scroll_y: y,
                document_height: 2000.0,
                viewport_height: 800.0,
            })
        };

        let _ = page.dispatch(snap(250.0), ms(0), &layout, &mut tracer);
        assert!(page.store().has_class(ids.navbar, Class::Scrolled));
        // Probe at 350 lies in B.
        assert_eq!(page.store().style(ids.about_link).highlight, Highlight::Accent);
        assert_eq!(page.store().style(ids.home_link).highlight, Highlight::None);

        // 60ms later, back at the top: chrome updates, highlight is dropped.
        layout.scroll_y = 0.0;
        let _ = page.dispatch(snap(0.0), ms(60), &layout, &mut tracer);
        assert!(!page.store().has_class(ids.navbar, Class::Scrolled));
        assert_eq!(page.store().style(ids.about_link).highlight, Highlight::Accent);

        let _ = page.dispatch(snap(0.0), ms(120), &layout, &mut tracer);
        assert_eq!(page.store().style(ids.home_link).highlight, Highlight::Accent);
        assert!(!page.store().has_class(ids.back_to_top, Class::Visible));
        assert!(page.store().style(ids.progress).width_percent.is_some());
    }

    #[test]
    fn pointer_move_is_throttled() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let viewport = Size::new(1000.0, 800.0);
        let mv = |x| Signal::PointerMove {
            pointer: Point::new(x, 400.0),
            viewport,
        };
        let _ = page.dispatch(mv(1000.0), ms(0), &NoLayout, &mut tracer);
        let first = page.store().style(ids.shape).transform;
        let _ = page.dispatch(mv(0.0), ms(10), &NoLayout, &mut tracer);
        assert_eq!(page.store().style(ids.shape).transform, first);
        let _ = page.dispatch(mv(0.0), ms(40), &NoLayout, &mut tracer);
        assert_ne!(page.store().style(ids.shape).transform, first);
    }

    #[test]
    fn lightbox_and_menu_share_scroll_lock() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let click = |c| Signal::Click(c);

        let _ = page.dispatch(
            click(Click::GalleryItem {
                caption: Some("Library".into()),
            }),
            ms(0),
            &NoLayout,
            &mut tracer,
        );
        let _ = page.dispatch(
            click(Click::GalleryItem { caption: None }),
            ms(1),
            &NoLayout,
            &mut tracer,
        );
        assert_eq!(page.store().text(ids.caption), Some("School Gallery"));
        assert!(page.store().style(ids.body).overflow_hidden);

        // Clicking the content does not close; the backdrop does.
        let _ = page.dispatch(click(Click::Lightbox { on_backdrop: false }), ms(2), &NoLayout, &mut tracer);
        assert!(page.lightbox().is_open());
        let _ = page.dispatch(click(Click::Hamburger), ms(3), &NoLayout, &mut tracer);
        let _ = page.dispatch(Signal::Key(Key::Escape), ms(4), &NoLayout, &mut tracer);
        assert!(!page.lightbox().is_open());
        assert!(page.store().style(ids.body).overflow_hidden, "menu still open");

        let _ = page.dispatch(click(Click::Document { inside_navbar: false }), ms(5), &NoLayout, &mut tracer);
        assert!(!page.menu().is_open());
        assert!(!page.store().has_class(ids.hamburger, Class::Active));
        assert!(!page.store().has_class(ids.nav_links, Class::Open));
        assert!(!page.store().style(ids.body).overflow_hidden);

        // Closing twice is fine.
        let _ = page.dispatch(click(Click::LightboxClose), ms(6), &NoLayout, &mut tracer);
        assert!(!page.scroll_lock().is_locked());
    }

    #[test]
    fn anchors_scroll_below_navbar() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let layout = TestLayout {
            scroll_y: 100.0,
            ids,
        };
        let r = page.dispatch(
            Signal::Click(Click::Anchor {
                target: Some(ids.about),
            }),
            ms(0),
            &layout,
            &mut tracer,
        );
        assert!(r.prevent_default);
        assert_eq!(r.scroll, Some(ScrollRequest::To(220.0)));

        let r = page.dispatch(Signal::Click(Click::Anchor { target: None }), ms(1), &layout, &mut tracer);
        assert_eq!(r, Response::default());

        let r = page.dispatch(Signal::Click(Click::BackToTop), ms(2), &layout, &mut tracer);
        assert_eq!(r.scroll, Some(ScrollRequest::To(0.0)));
    }

    #[test]
    fn card_tilt_and_reset() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let layout = TestLayout { scroll_y: 0.0, ids };
        let _ = page.dispatch(
            Signal::CardPointer {
                card: ids.card,
                pointer: Point::new(100.0, 400.0),
            },
            ms(0),
            &layout,
            &mut tracer,
        );
        assert!(matches!(page.store().style(ids.card).transform, Transform::Tilt(_)));
        let _ = page.dispatch(Signal::CardLeave { card: ids.card }, ms(1), &layout, &mut tracer);
        assert_eq!(page.store().style(ids.card).transform, Transform::None);
    }

    #[test]
    fn typewriter_starts_after_delay() {
        let Fixture { mut page, ids } = fixture(Availability::Available);
        let mut tracer = Tracer::none();
        let _ = page.mount(ms(0), &NoLayout, &mut tracer);
        assert_eq!(page.store().text(ids.badge), Some(""));
        assert_eq!(page.next_deadline(), Some(ms(1_600)));

        let _ = page.advance(ms(1_600), &mut tracer);
        assert_eq!(page.store().text(ids.badge), Some("H"));
        let _ = page.advance(ms(1_638), &mut tracer);
        assert_eq!(page.store().text(ids.badge), Some("Hi"));
        assert_eq!(page.next_deadline(), None);

        // The load registration is one-shot.
        let _ = page.dispatch(Signal::Loaded, ms(2_000), &NoLayout, &mut tracer);
        assert_eq!(page.store().text(ids.badge), Some("Hi"));
    }

    #[test]
    fn submit_is_prevented_and_completes_after_delay() {
        let mut store = ElementStore::new();
        let mut form = FormElements::default();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            form.inputs[i] = Some(store.register(field.id()));
        }
        let success = store.register("formSuccess");
        form.success = Some(success);
        let markup = PageMarkup {
            form,
            ..PageMarkup::default()
        };
        let mut page = Page::new(PageConfig::standard(), store, markup, Availability::Available);
        let mut tracer = Tracer::none();

        let r = page.dispatch(Signal::Submit, ms(0), &NoLayout, &mut tracer);
        assert!(r.prevent_default);
        assert_eq!(page.form().state(), FormState::Idle);
        assert_eq!(page.form().errors().len(), 4);

        for (field, value) in [
            (Field::ParentName, "Alice K"),
            (Field::Phone, "919876543210"),
            (Field::ChildName, "Sam"),
            (Field::ClassApplying, "3"),
        ] {
            let _ = page.dispatch(
                Signal::Input {
                    control: field.into(),
                    value: value.into(),
                },
                ms(10),
                &NoLayout,
                &mut tracer,
            );
        }
        let _ = page.dispatch(Signal::Submit, ms(100), &NoLayout, &mut tracer);
        assert_eq!(page.form().state(), FormState::Submitting);

        let r = page.advance(ms(1_899), &mut tracer);
        assert_eq!(r.scroll, None);
        let r = page.advance(ms(1_900), &mut tracer);
        assert_eq!(page.form().state(), FormState::Success);
        assert_eq!(r.scroll, Some(ScrollRequest::IntoView(success)));
        assert!(page.store().has_class(success, Class::Show));
    }

    #[test]
    fn delay_until_saturates() {
        assert_eq!(delay_until(ms(10), ms(4)), Duration::ZERO);
        assert_eq!(delay_until(ms(4), ms(10)), Duration::from_millis(6));
    }
}
