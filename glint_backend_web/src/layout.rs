// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry reads from the live document.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use web_sys::{Document, Element, HtmlElement, Window};

use glint_core::backend::Layout;
use glint_core::element::ElementId;
use glint_core::scroll::ScrollSnapshot;

/// [`Layout`] backed by `getBoundingClientRect()` and the window scroll
/// offset.
#[derive(Debug)]
pub(crate) struct WebLayout {
    window: Window,
    document: Document,
    elements: Vec<HtmlElement>,
}

impl WebLayout {
    pub(crate) fn new(window: Window, document: Document, elements: Vec<HtmlElement>) -> Self {
        Self {
            window,
            document,
            elements,
        }
    }

    /// The handle registered for `target`, if any.
    pub(crate) fn id_of(&self, target: &Element) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| AsRef::<Element>::as_ref(el) == target)
            .and_then(|i| u32::try_from(i).ok())
            .map(ElementId::from_index)
    }

    /// Viewport size in CSS pixels.
    pub(crate) fn viewport(&self) -> Size {
        Size::new(
            number(self.window.inner_width()),
            number(self.window.inner_height()),
        )
    }

    /// Scroll state for the chrome and highlight passes.
    pub(crate) fn snapshot(&self) -> ScrollSnapshot {
        let document_height = self
            .document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_height()));
        ScrollSnapshot {
            scroll_y: self.scroll_y(),
            document_height,
            viewport_height: self.viewport().height,
        }
    }
}

impl Layout for WebLayout {
    fn client_rect(&self, element: ElementId) -> Option<Rect> {
        let r = self
            .elements
            .get(element.index() as usize)?
            .get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

/// A pointer position from integer client coordinates.
pub(crate) fn client_point(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

fn number(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}
