// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot visibility watching.
//!
//! A [`VisibilityWatcher`] stands in front of one platform observation
//! primitive (an `IntersectionObserver` in browsers) for one group of
//! elements. The primitive applies the [`ObserverOptions`] and reports
//! [`ObservationEntry`] values; the watcher turns those into "became
//! visible" events with one-shot semantics:
//!
//! - The first qualifying entry for an element fires it and detaches it, so
//!   visibility loss and regain never fire again.
//! - Entries for elements the watcher never observed, or already fired, are
//!   ignored.
//!
//! When the platform has no observation primitive the watcher is created
//! [`Degraded`](Availability::Degraded) and fires every element as soon as it
//! is observed, so content gated on visibility is never stuck hidden.
//!
//! [`intersection_ratio`] and [`VisibilityWatcher::entry_for`] compute
//! entries from geometry. They model the primitive for tests and headless
//! hosts.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::ElementId;
use crate::time::HostTime;

/// Root margin around the viewport, in pixels, using CSS margin order.
///
/// Positive values grow the observed region; negative values shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin {
    /// Top edge offset.
    pub top: f64,
    /// Right edge offset.
    pub right: f64,
    /// Bottom edge offset.
    pub bottom: f64,
    /// Left edge offset.
    pub left: f64,
}

impl RootMargin {
    /// No margin.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// A margin applied to the bottom edge only.
    #[must_use]
    pub const fn bottom(px: f64) -> Self {
        Self {
            bottom: px,
            ..Self::ZERO
        }
    }

    /// Applies the margin to a root rectangle.
    #[must_use]
    pub fn apply(self, root: Rect) -> Rect {
        Rect::new(
            root.x0 - self.left,
            root.y0 - self.top,
            root.x1 + self.right,
            root.y1 + self.bottom,
        )
    }
}

/// Options handed to the observation primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be inside the root region.
    pub threshold: f64,
    /// Margin applied to the viewport before intersecting.
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Options with a threshold and no root margin.
    #[must_use]
    pub const fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::ZERO,
        }
    }
}

/// One visibility report from the observation primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationEntry {
    /// The reported element.
    pub element: ElementId,
    /// Whether the element meets the observer's threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the element.
    pub ratio: f64,
    /// When the primitive observed the change.
    pub time: HostTime,
}

/// Whether a platform observation primitive backs the watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The primitive exists; elements fire on qualifying entries.
    Available,
    /// No primitive; elements fire as soon as they are observed.
    Degraded,
}

/// A one-shot watcher over one element group.
#[derive(Clone, Debug)]
pub struct VisibilityWatcher {
    options: ObserverOptions,
    availability: Availability,
    observing: Vec<ElementId>,
    fired: Vec<ElementId>,
}

impl VisibilityWatcher {
    /// Creates a watcher with nothing observed yet.
    #[must_use]
    pub fn new(options: ObserverOptions, availability: Availability) -> Self {
        Self {
            options,
            availability,
            observing: Vec::new(),
            fired: Vec::new(),
        }
    }

    /// Options for the backing primitive.
    #[must_use]
    pub const fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Whether the watcher is degraded.
    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.availability
    }

    /// Starts observing `elements`.
    ///
    /// Returns the elements that fired immediately, which is all newly
    /// observed ones when degraded and none otherwise. Elements already
    /// observed or already fired are skipped.
    pub fn observe(&mut self, elements: impl IntoIterator<Item = ElementId>) -> Vec<ElementId> {
        let mut immediate = Vec::new();
        for el in elements {
            if self.observing.contains(&el) || self.fired.contains(&el) {
                continue;
            }
            match self.availability {
                Availability::Available => self.observing.push(el),
                Availability::Degraded => {
                    self.fired.push(el);
                    immediate.push(el);
                }
            }
        }
        immediate
    }

    /// Consumes a batch of entries and returns the elements that became
    /// visible, in entry order. Fired elements stop being observed.
    pub fn deliver(&mut self, entries: &[ObservationEntry]) -> Vec<ElementId> {
        let mut fired = Vec::new();
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            if let Some(pos) = self.observing.iter().position(|e| *e == entry.element) {
                self.observing.remove(pos);
                self.fired.push(entry.element);
                fired.push(entry.element);
            }
        }
        fired
    }

    /// Elements still being observed.
    #[must_use]
    pub fn observing(&self) -> &[ElementId] {
        &self.observing
    }

    /// Returns whether `element` is still being observed.
    #[must_use]
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observing.contains(&element)
    }

    /// Returns whether `element` has fired.
    #[must_use]
    pub fn has_fired(&self, element: ElementId) -> bool {
        self.fired.contains(&element)
    }

    /// Builds the entry the primitive would report for `element` given its
    /// viewport-relative box and the viewport rectangle.
    #[must_use]
    pub fn entry_for(
        &self,
        element: ElementId,
        target: Rect,
        viewport: Rect,
        time: HostTime,
    ) -> ObservationEntry {
        let ratio = intersection_ratio(target, viewport, self.options.root_margin);
        ObservationEntry {
            element,
            is_intersecting: ratio > 0.0 && ratio >= self.options.threshold,
            ratio,
            time,
        }
    }
}

/// Fraction of `target` inside `viewport` grown (or shrunk) by `margin`.
///
/// A zero-area target counts as fully visible when its origin lies inside
/// the root region and invisible otherwise.
#[must_use]
pub fn intersection_ratio(target: Rect, viewport: Rect, margin: RootMargin) -> f64 {
    let root = margin.apply(viewport);
    let area = target.area();
    if area <= 0.0 {
        let inside = target.x0 >= root.x0
            && target.x0 <= root.x1
            && target.y0 >= root.y0
            && target.y0 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = target.intersect(root);
    (overlap.area() / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    fn el(i: u32) -> ElementId {
        ElementId::from_index(i)
    }

    fn entry(element: ElementId, is_intersecting: bool) -> ObservationEntry {
        ObservationEntry {
            element,
            is_intersecting,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
            time: HostTime(0),
        }
    }

    #[test]
    fn toggling_visibility_fires_once() {
        let mut w = VisibilityWatcher::new(ObserverOptions::threshold(0.5), Availability::Available);
        assert!(w.observe([el(0), el(1)]).is_empty());

        assert_eq!(w.deliver(&[entry(el(0), true)]), [el(0)]);
        assert!(w.deliver(&[entry(el(0), false)]).is_empty());
        assert!(w.deliver(&[entry(el(0), true)]).is_empty());
        assert!(!w.is_observing(el(0)));
        assert!(w.has_fired(el(0)));
        assert!(w.is_observing(el(1)));
    }

    #[test]
    fn duplicate_entries_in_one_batch_fire_once() {
        let mut w = VisibilityWatcher::new(ObserverOptions::threshold(0.1), Availability::Available);
        let _ = w.observe([el(3)]);
        assert_eq!(w.deliver(&[entry(el(3), true), entry(el(3), true)]), [el(3)]);
    }

    #[test]
    fn unobserved_elements_are_ignored() {
        let mut w = VisibilityWatcher::new(ObserverOptions::threshold(0.1), Availability::Available);
        let _ = w.observe([el(0)]);
        assert!(w.deliver(&[entry(el(9), true)]).is_empty());
    }

    #[test]
    fn degraded_watcher_fires_at_registration() {
        let mut w = VisibilityWatcher::new(ObserverOptions::threshold(0.4), Availability::Degraded);
        assert_eq!(w.observe([el(0), el(1)]), [el(0), el(1)]);
        assert!(w.observing().is_empty());
        // Re-observing a fired element does not fire it again.
        assert!(w.observe([el(1)]).is_empty());
        assert!(w.deliver(&[entry(el(0), true)]).is_empty());
    }

    #[test]
    fn ratio_respects_root_margin() {
        // 100px tall element whose bottom 50px hang below the fold.
        let target = Rect::new(0.0, 750.0, 100.0, 850.0);
        let plain = intersection_ratio(target, VIEWPORT, RootMargin::ZERO);
        assert!((plain - 0.5).abs() < 1e-9);

        // Shrinking the bottom by 60px leaves nothing visible.
        let shrunk = intersection_ratio(target, VIEWPORT, RootMargin::bottom(-60.0));
        assert!(shrunk.abs() < 1e-9);
    }

    #[test]
    fn entry_for_applies_threshold() {
        let w = VisibilityWatcher::new(ObserverOptions::threshold(0.5), Availability::Available);
        let target = Rect::new(0.0, 760.0, 100.0, 860.0); // 40% visible
        let e = w.entry_for(el(0), target, VIEWPORT, HostTime(5));
        assert!(!e.is_intersecting);
        assert!((e.ratio - 0.4).abs() < 1e-9);

        let target = Rect::new(0.0, 700.0, 100.0, 800.0); // fully visible
        assert!(w.entry_for(el(0), target, VIEWPORT, HostTime(6)).is_intersecting);
    }
}
