// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven page chrome and active-section highlighting.
//!
//! Two passes run on (throttled) scroll signals:
//!
//! - [`ScrollTracker::update_chrome`]: navbar condensed state, back-to-top
//!   visibility, and the reading-progress bar.
//! - [`ScrollTracker::update_highlight`]: accent colour on the navigation
//!   link of every section containing the probe line.
//!
//! Both passes are pure functions of the current [`ScrollSnapshot`] and
//! layout, so dropped (throttled) signals lose nothing: the next admitted
//! one recomputes everything.

use alloc::vec::Vec;

use crate::backend::Layout;
use crate::element::{Class, ElementId, ElementStore, Highlight};

/// Document scroll metrics at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    /// Vertical scroll offset.
    pub scroll_y: f64,
    /// Total document height.
    pub document_height: f64,
    /// Viewport height.
    pub viewport_height: f64,
}

impl ScrollSnapshot {
    /// Reading progress in percent: `scroll_y / (document - viewport) * 100`.
    ///
    /// Not clamped; presenters clamp when writing. A non-scrollable document
    /// (or any non-finite result) reads as 0.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        let p = self.scroll_y / scrollable * 100.0;
        if p.is_finite() { p } else { 0.0 }
    }
}

/// Thresholds for the scroll passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    /// Navbar condenses strictly above this offset.
    pub navbar_threshold: f64,
    /// Back-to-top shows strictly above this offset.
    pub back_to_top_threshold: f64,
    /// Distance from the viewport top to the section probe line.
    pub probe_offset: f64,
}

/// A page section and the navigation link that targets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    /// The section element.
    pub element: ElementId,
    /// The link whose `href` names the section, if any.
    pub link: Option<ElementId>,
}

/// Result of the chrome pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromeState {
    /// Navbar condensed.
    pub navbar_scrolled: bool,
    /// Back-to-top shown.
    pub back_to_top_visible: bool,
    /// Reading progress, unclamped.
    pub progress_percent: f64,
}

/// Returns whether `probe` lies in `[top, top + height)`.
#[must_use]
pub fn section_contains(top: f64, height: f64, probe: f64) -> bool {
    probe >= top && probe < top + height
}

/// Tracks scroll-dependent chrome and section highlighting.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    config: ScrollConfig,
    navbar: Option<ElementId>,
    back_to_top: Option<ElementId>,
    progress: Option<ElementId>,
    sections: Vec<Section>,
}

impl ScrollTracker {
    /// Creates a tracker. Missing chrome elements are skipped silently.
    #[must_use]
    pub fn new(
        config: ScrollConfig,
        navbar: Option<ElementId>,
        back_to_top: Option<ElementId>,
        progress: Option<ElementId>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            config,
            navbar,
            back_to_top,
            progress,
            sections,
        }
    }

    /// Tracked sections, in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Applies navbar, back-to-top, and progress state for `snapshot`.
    pub fn update_chrome(&self, store: &mut ElementStore, snapshot: &ScrollSnapshot) -> ChromeState {
        let state = ChromeState {
            navbar_scrolled: snapshot.scroll_y > self.config.navbar_threshold,
            back_to_top_visible: snapshot.scroll_y > self.config.back_to_top_threshold,
            progress_percent: snapshot.progress_percent(),
        };
        if let Some(navbar) = self.navbar {
            store.set_class(navbar, Class::Scrolled, state.navbar_scrolled);
        }
        if let Some(button) = self.back_to_top {
            store.set_class(button, Class::Visible, state.back_to_top_visible);
        }
        if let Some(bar) = self.progress {
            store.set_width_percent(bar, Some(state.progress_percent));
        }
        state
    }

    /// Highlights the link of every section containing the probe line at
    /// `scroll_y + probe_offset`.
    ///
    /// Links are written in section order and each write covers the link's
    /// full state, so when sections overlap (or several share a link) the
    /// last section decides. Sections that are not laid out are skipped.
    /// Returns the sections found active.
    pub fn update_highlight(
        &self,
        store: &mut ElementStore,
        scroll_y: f64,
        layout: &dyn Layout,
    ) -> Vec<ElementId> {
        let probe = scroll_y + self.config.probe_offset;
        let mut active = Vec::new();
        for section in &self.sections {
            let Some(rect) = layout.document_rect(section.element) else {
                continue;
            };
            let on = section_contains(rect.y0, rect.height(), probe);
            if on {
                active.push(section.element);
            }
            if let Some(link) = section.link {
                let highlight = if on { Highlight::Accent } else { Highlight::None };
                store.set_highlight(link, highlight);
            }
        }
        active
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    const CONFIG: ScrollConfig = ScrollConfig {
        navbar_threshold: 60.0,
        back_to_top_threshold: 500.0,
        probe_offset: 100.0,
    };

    /// Sections stacked in document space; the viewport scrolls over them.
    struct Stacked {
        rects: Vec<(ElementId, Rect)>,
        scroll_y: f64,
    }

    impl Layout for Stacked {
        fn client_rect(&self, element: ElementId) -> Option<Rect> {
            self.rects
                .iter()
                .find(|(e, _)| *e == element)
                .map(|(_, r)| Rect::new(r.x0, r.y0 - self.scroll_y, r.x1, r.y1 - self.scroll_y))
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }
    }

    fn snapshot(scroll_y: f64) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y,
            document_height: 3000.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn progress_percent_matches_formula() {
        let p = snapshot(1100.0).progress_percent();
        assert!((p - 50.0).abs() < 1e-9);

        let flat = ScrollSnapshot {
            scroll_y: 0.0,
            document_height: 800.0,
            viewport_height: 800.0,
        };
        assert!(flat.progress_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn chrome_thresholds_are_strict() {
        let mut store = ElementStore::new();
        let navbar = store.register("navbar");
        let button = store.register("backToTop");
        let bar = store.register("scrollProgress");
        let tracker = ScrollTracker::new(CONFIG, Some(navbar), Some(button), Some(bar), Vec::new());

        let s = tracker.update_chrome(&mut store, &snapshot(60.0));
        assert!(!s.navbar_scrolled);
        assert!(!store.has_class(navbar, Class::Scrolled));

        let s = tracker.update_chrome(&mut store, &snapshot(501.0));
        assert!(s.navbar_scrolled && s.back_to_top_visible);
        assert!(store.has_class(navbar, Class::Scrolled));
        assert!(store.has_class(button, Class::Visible));
        assert!(store.style(bar).width_percent.is_some());

        let _ = tracker.update_chrome(&mut store, &snapshot(0.0));
        assert!(!store.has_class(button, Class::Visible));
    }

    #[test]
    fn missing_chrome_is_skipped() {
        let mut store = ElementStore::new();
        let tracker = ScrollTracker::new(CONFIG, None, None, None, Vec::new());
        let s = tracker.update_chrome(&mut store, &snapshot(900.0));
        assert!(s.navbar_scrolled);
        assert!(store.evaluate().is_empty());
    }

    #[test]
    fn probe_selects_section_half_open() {
        assert!(section_contains(0.0, 400.0, 0.0));
        assert!(!section_contains(0.0, 400.0, 400.0));
        assert!(section_contains(400.0, 400.0, 400.0));
    }

    #[test]
    fn highlight_follows_probe_line() {
        let mut store = ElementStore::new();
        let home = store.register("home");
        let about = store.register("about");
        let home_link = store.register("a[href='#home']");
        let about_link = store.register("a[href='#about']");
        let tracker = ScrollTracker::new(
            CONFIG,
            None,
            None,
            None,
            alloc::vec![
                Section {
                    element: home,
                    link: Some(home_link),
                },
                Section {
                    element: about,
                    link: Some(about_link),
                },
            ],
        );
        let mut layout = Stacked {
            rects: alloc::vec![
                (home, Rect::new(0.0, 0.0, 1000.0, 700.0)),
                (about, Rect::new(0.0, 700.0, 1000.0, 1500.0)),
            ],
            scroll_y: 0.0,
        };

        assert_eq!(tracker.update_highlight(&mut store, 0.0, &layout), [home]);
        assert_eq!(store.style(home_link).highlight, Highlight::Accent);
        assert_eq!(store.style(about_link).highlight, Highlight::None);

        // Probe at 700 enters the second section.
        layout.scroll_y = 600.0;
        assert_eq!(tracker.update_highlight(&mut store, 600.0, &layout), [about]);
        assert_eq!(store.style(home_link).highlight, Highlight::None);
        assert_eq!(store.style(about_link).highlight, Highlight::Accent);
    }

    #[test]
    fn shared_link_takes_last_section_state() {
        let mut store = ElementStore::new();
        let a = store.register("a");
        let b = store.register("b");
        let link = store.register("link");
        let tracker = ScrollTracker::new(
            CONFIG,
            None,
            None,
            None,
            alloc::vec![
                Section {
                    element: a,
                    link: Some(link),
                },
                Section {
                    element: b,
                    link: Some(link),
                },
            ],
        );
        let layout = Stacked {
            rects: alloc::vec![
                (a, Rect::new(0.0, 0.0, 10.0, 500.0)),
                (b, Rect::new(0.0, 500.0, 10.0, 900.0)),
            ],
            scroll_y: 0.0,
        };
        // Probe at 100 is inside `a` only; `b` writes last and clears it.
        assert_eq!(tracker.update_highlight(&mut store, 0.0, &layout), [a]);
        assert_eq!(store.style(link).highlight, Highlight::None);
    }
}
