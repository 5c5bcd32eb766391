// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signals and the handler registration table.
//!
//! Backends translate platform events into [`Signal`] values. The page
//! routes each signal through its [`Registry`]: every [`Registration`]
//! whose sources include the signal's [`SourceKind`] is consulted in
//! registration order, its own [`RateLimiter`] (if any) admits or drops the
//! call, and admitted calls run the registration's [`Handler`]. Order
//! matters for layered effects: the chrome pass runs before the highlight
//! pass on the same scroll signal.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::config::PageConfig;
use crate::element::ElementId;
use crate::form::Control;
use crate::scroll::ScrollSnapshot;
use crate::throttle::RateLimiter;
use crate::time::{Duration, HostTime};
use crate::visibility::ObservationEntry;

/// Identifies one of the page's visibility watchers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WatcherKind {
    /// Scroll-reveal elements.
    Reveal,
    /// Hero statistics counters.
    HeroCounter,
    /// Statistics grid counters.
    GridCounter,
}

impl WatcherKind {
    /// All watchers.
    pub const ALL: [Self; 3] = [Self::Reveal, Self::HeroCounter, Self::GridCounter];
}

/// A click target the page reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Click {
    /// The hamburger control.
    Hamburger,
    /// A link inside the navigation list.
    NavLink,
    /// Anywhere in the document.
    Document {
        /// Whether the click landed inside the navbar.
        inside_navbar: bool,
    },
    /// An in-page anchor.
    Anchor {
        /// The element the `href` fragment names, if it exists.
        target: Option<ElementId>,
    },
    /// The back-to-top control.
    BackToTop,
    /// A gallery item.
    GalleryItem {
        /// The item's overlay caption, if it has one.
        caption: Option<String>,
    },
    /// The lightbox close control.
    LightboxClose,
    /// The lightbox overlay or its content.
    Lightbox {
        /// Whether the overlay itself (not its content) was the target.
        on_backdrop: bool,
    },
}

/// A key the page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Anything else.
    Other,
}

/// An input to the page.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// The document finished loading.
    Loaded,
    /// The document scrolled.
    Scroll(ScrollSnapshot),
    /// The pointer moved over the document.
    PointerMove {
        /// Viewport-relative pointer position.
        pointer: Point,
        /// Viewport size.
        viewport: Size,
    },
    /// A visibility primitive delivered entries.
    Visibility {
        /// Which watcher's primitive reported.
        watcher: WatcherKind,
        /// The entries, in delivery order.
        entries: Vec<ObservationEntry>,
    },
    /// A click.
    Click(Click),
    /// A key press.
    Key(Key),
    /// The user edited a form control.
    Input {
        /// The edited control.
        control: Control,
        /// Its new value.
        value: String,
    },
    /// The form was submitted.
    Submit,
    /// The pointer moved over a card.
    CardPointer {
        /// The card.
        card: ElementId,
        /// Viewport-relative pointer position.
        pointer: Point,
    },
    /// The pointer left a card.
    CardLeave {
        /// The card.
        card: ElementId,
    },
}

/// Coarse signal category used for routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// [`Signal::Loaded`].
    Loaded,
    /// [`Signal::Scroll`].
    Scroll,
    /// [`Signal::PointerMove`].
    PointerMove,
    /// [`Signal::Visibility`].
    Visibility,
    /// [`Signal::Click`].
    Click,
    /// [`Signal::Key`].
    Key,
    /// [`Signal::Input`].
    Input,
    /// [`Signal::Submit`].
    Submit,
    /// [`Signal::CardPointer`] and [`Signal::CardLeave`].
    CardPointer,
}

impl Signal {
    /// The routing category.
    #[must_use]
    pub const fn source(&self) -> SourceKind {
        match self {
            Self::Loaded => SourceKind::Loaded,
            Self::Scroll(_) => SourceKind::Scroll,
            Self::PointerMove { .. } => SourceKind::PointerMove,
            Self::Visibility { .. } => SourceKind::Visibility,
            Self::Click(_) => SourceKind::Click,
            Self::Key(_) => SourceKind::Key,
            Self::Input { .. } => SourceKind::Input,
            Self::Submit => SourceKind::Submit,
            Self::CardPointer { .. } | Self::CardLeave { .. } => SourceKind::CardPointer,
        }
    }
}

/// A behaviour the page runs in response to signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Navbar, back-to-top, and progress bar.
    ScrollChrome,
    /// Active-section link highlight.
    SectionHighlight,
    /// Background shape parallax.
    Parallax,
    /// Reveal and counter watchers.
    Visibility,
    /// Menu, anchors, back-to-top, gallery, and lightbox.
    Interaction,
    /// Form validation and submission.
    Form,
    /// Card tilt.
    CardTilt,
    /// Typewriter start and the loaded trace.
    Startup,
}

/// Whether a registration survives its first run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Firing {
    /// Deactivates after the first admitted call.
    Once,
    /// Runs on every admitted call.
    Repeating,
}

/// One row of the registration table.
#[derive(Clone, Copy, Debug)]
pub struct Registration {
    handler: Handler,
    sources: &'static [SourceKind],
    limiter: Option<RateLimiter>,
    firing: Firing,
    active: bool,
}

impl Registration {
    /// A repeating, unthrottled registration.
    #[must_use]
    pub const fn new(handler: Handler, sources: &'static [SourceKind]) -> Self {
        Self {
            handler,
            sources,
            limiter: None,
            firing: Firing::Repeating,
            active: true,
        }
    }

    /// Adds a leading-edge throttle.
    #[must_use]
    pub const fn throttled(mut self, min_interval: Duration) -> Self {
        self.limiter = Some(RateLimiter::new(min_interval));
        self
    }

    /// Makes the registration one-shot.
    #[must_use]
    pub const fn once(mut self) -> Self {
        self.firing = Firing::Once;
        self
    }

    /// The handler.
    #[must_use]
    pub const fn handler(&self) -> Handler {
        self.handler
    }

    /// The throttle, if any.
    #[must_use]
    pub const fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }

    /// One-shot or repeating.
    #[must_use]
    pub const fn firing(&self) -> Firing {
        self.firing
    }

    /// Returns `false` once a one-shot registration has run.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns whether this registration listens to `source`.
    #[must_use]
    pub fn listens_to(&self, source: SourceKind) -> bool {
        self.sources.contains(&source)
    }

    /// Admits or drops a call at `now`.
    ///
    /// Returns `None` if the registration does not take `source` or is
    /// inactive, `Some(false)` if the throttle dropped the call.
    pub fn admit(&mut self, source: SourceKind, now: HostTime) -> Option<bool> {
        if !self.active || !self.listens_to(source) {
            return None;
        }
        let admitted = self.limiter.as_mut().is_none_or(|l| l.try_acquire(now));
        if admitted && self.firing == Firing::Once {
            self.active = false;
        }
        Some(admitted)
    }
}

/// Registrations in dispatch order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    /// An empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The school page's table.
    #[must_use]
    pub fn standard(config: &PageConfig) -> Self {
        use SourceKind as S;

        let mut r = Self::new();
        r.push(Registration::new(Handler::ScrollChrome, &[S::Scroll]).throttled(config.chrome_throttle));
        r.push(
            Registration::new(Handler::SectionHighlight, &[S::Scroll])
                .throttled(config.highlight_throttle),
        );
        r.push(Registration::new(Handler::Parallax, &[S::PointerMove]).throttled(config.pointer_throttle));
        r.push(Registration::new(Handler::Visibility, &[S::Visibility]));
        r.push(Registration::new(Handler::Interaction, &[S::Click, S::Key]));
        r.push(Registration::new(Handler::Form, &[S::Input, S::Submit]));
        r.push(Registration::new(Handler::CardTilt, &[S::CardPointer]));
        r.push(Registration::new(Handler::Startup, &[S::Loaded]).once());
        r
    }

    /// Appends a registration.
    pub fn push(&mut self, registration: Registration) {
        self.entries.push(registration);
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registrations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Admits a call on the registration at `index`; see
    /// [`Registration::admit`].
    pub fn admit(&mut self, index: usize, source: SourceKind, now: HostTime) -> Option<(Handler, bool)> {
        let reg = self.entries.get_mut(index)?;
        reg.admit(source, now).map(|admitted| (reg.handler, admitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_order() {
        let r = Registry::standard(&PageConfig::standard());
        let handlers: Vec<_> = r.iter().map(Registration::handler).collect();
        assert_eq!(
            handlers,
            [
                Handler::ScrollChrome,
                Handler::SectionHighlight,
                Handler::Parallax,
                Handler::Visibility,
                Handler::Interaction,
                Handler::Form,
                Handler::CardTilt,
                Handler::Startup,
            ]
        );
    }

    #[test]
    fn scroll_registrations_throttle_independently() {
        let mut r = Registry::standard(&PageConfig::standard());
        let t0 = HostTime::from_millis(1_000);
        assert_eq!(r.admit(0, SourceKind::Scroll, t0), Some((Handler::ScrollChrome, true)));
        assert_eq!(r.admit(1, SourceKind::Scroll, t0), Some((Handler::SectionHighlight, true)));

        // 60ms later: chrome (50ms) runs, highlight (100ms) is dropped.
        let t1 = HostTime::from_millis(1_060);
        assert_eq!(r.admit(0, SourceKind::Scroll, t1), Some((Handler::ScrollChrome, true)));
        assert_eq!(r.admit(1, SourceKind::Scroll, t1), Some((Handler::SectionHighlight, false)));
        assert_eq!(r.admit(2, SourceKind::Scroll, t1), None);
    }

    #[test]
    fn once_registration_deactivates() {
        let mut reg = Registration::new(Handler::Startup, &[SourceKind::Loaded]).once();
        assert_eq!(reg.admit(SourceKind::Loaded, HostTime(0)), Some(true));
        assert!(!reg.is_active());
        assert_eq!(reg.admit(SourceKind::Loaded, HostTime(1)), None);
    }

    #[test]
    fn card_leave_routes_with_card_pointer() {
        let leave = Signal::CardLeave {
            card: ElementId::from_index(0),
        };
        assert_eq!(leave.source(), SourceKind::CardPointer);
        assert_eq!(Signal::Key(Key::Escape).source(), SourceKind::Key);
    }
}
