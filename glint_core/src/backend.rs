// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Glint splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Signal sources**: Listeners for scroll, pointer, click, key, input,
//!   and submit events that translate platform events into
//!   [`Signal`](crate::registry::Signal) values and hand them to
//!   [`Page::dispatch`](crate::page::Page::dispatch). Setup differs per
//!   platform, so this is not abstracted by a trait.
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock.
//!
//! - **Pump**: One platform timer armed for
//!   [`Page::next_deadline`](crate::page::Page::next_deadline) and one
//!   animation-frame callback while
//!   [`Page::wants_frame`](crate::page::Page::wants_frame) is true.
//!
//! - **Observation**: One visibility primitive per watcher, reporting
//!   [`ObservationEntry`](crate::visibility::ObservationEntry) batches.
//!
//! - **Layout**: Implements [`Layout`] so handlers can read element boxes.
//!
//! - **Presenter**: Implements [`Presenter`] to apply element changes to a
//!   platform-native tree (DOM elements in browsers).
//!
//! # Crate boundaries
//!
//! `glint_core` owns the element model, scheduling, the page state machines,
//! and this contract module. Backend crates depend on `glint_core` and
//! provide platform glue.

use kurbo::Rect;

use crate::element::{ElementChanges, ElementId, ElementStore};

/// Applies evaluated element changes to a platform-native tree.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_event(signal: Signal) {
///     let response = page.dispatch(signal, now(), &layout, &mut tracer);
///     apply_response(response);
///
///     let changes = page.evaluate();
///     presenter.apply(page.store(), &changes);
///     rearm_timer(page.next_deadline());
/// }
/// ```
pub trait Presenter {
    /// Applies `changes`, reading current values from `store` as needed.
    fn apply(&mut self, store: &ElementStore, changes: &ElementChanges);
}

/// Read access to laid-out element geometry.
///
/// Returning `None` means the element is not rendered; callers skip it.
pub trait Layout {
    /// The element's border box relative to the viewport.
    fn client_rect(&self, element: ElementId) -> Option<Rect>;

    /// Current vertical document scroll offset.
    fn scroll_y(&self) -> f64;

    /// The element's border box relative to the document.
    fn document_rect(&self, element: ElementId) -> Option<Rect> {
        let scroll_y = self.scroll_y();
        self.client_rect(element)
            .map(|r| Rect::new(r.x0, r.y0 + scroll_y, r.x1, r.y1 + scroll_y))
    }
}

/// A [`Layout`] with no rendered elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLayout;

impl Layout for NoLayout {
    fn client_rect(&self, element: ElementId) -> Option<Rect> {
        _ = element;
        None
    }

    fn scroll_y(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::element::Class;

    #[derive(Default)]
    struct RecordingPresenter {
        applied: Vec<ElementChanges>,
    }

    impl Presenter for RecordingPresenter {
        fn apply(&mut self, store: &ElementStore, changes: &ElementChanges) {
            _ = store;
            self.applied.push(changes.clone());
        }
    }

    struct Fixed(f64);

    impl Layout for Fixed {
        fn client_rect(&self, element: ElementId) -> Option<Rect> {
            (element.index() == 0).then_some(Rect::new(0.0, 40.0, 100.0, 90.0))
        }

        fn scroll_y(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn document_rect_adds_scroll_offset() {
        let layout = Fixed(1200.0);
        assert_eq!(
            layout.document_rect(ElementId::from_index(0)),
            Some(Rect::new(0.0, 1240.0, 100.0, 1290.0))
        );
        assert_eq!(layout.document_rect(ElementId::from_index(1)), None);
        assert_eq!(NoLayout.client_rect(ElementId::from_index(0)), None);
    }

    #[test]
    fn presenter_sees_only_real_changes() {
        let mut store = ElementStore::new();
        let nav = store.register("navbar");
        let mut presenter = RecordingPresenter::default();

        store.set_class(nav, Class::Scrolled, true);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        // Rewriting the same state marks nothing.
        store.set_class(nav, Class::Scrolled, true);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        assert_eq!(presenter.applied[0].classes, [0]);
        assert!(presenter.applied[1].is_empty());
    }
}
