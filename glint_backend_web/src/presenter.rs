// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element updates.
//!
//! Translates [`ElementStore`] state into class-list, text, inline-style,
//! `disabled`, and `value` writes on live elements, applying only what
//! [`ElementChanges`] lists.
//!
//! [`ElementStore`]: glint_core::element::ElementStore
//! [`ElementChanges`]: glint_core::element::ElementChanges

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use glint_core::backend::Presenter;
use glint_core::element::{
    Class, ClassFlags, ElementChanges, ElementId, ElementStore, Highlight, InlineStyle, Transform,
};
use wasm_bindgen::JsCast as _;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Colour of the active section's navigation link.
const ACCENT: &str = "var(--gold-light)";

/// Maps element slots to live DOM elements.
///
/// Slot `i` holds the element registered as `ElementId::from_index(i)`.
/// Class and inline-style writes are diffed against what this presenter last
/// applied, so tokens and properties the markup set itself are never removed.
pub struct DomPresenter {
    elements: Vec<HtmlElement>,
    applied: Vec<ClassFlags>,
    applied_styles: Vec<InlineStyle>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("elements_len", &self.elements.len())
            .field("applied", &self.applied)
            .field("applied_styles", &self.applied_styles)
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter over elements in slot order.
    #[must_use]
    pub fn new(elements: Vec<HtmlElement>) -> Self {
        let applied = alloc::vec![ClassFlags::default(); elements.len()];
        let applied_styles = alloc::vec![InlineStyle::default(); elements.len()];
        Self {
            elements,
            applied,
            applied_styles,
        }
    }

    /// Returns the DOM element for the given slot index, if it exists.
    #[must_use]
    pub fn get_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.elements.get(idx as usize)
    }

    fn apply_classes(&mut self, idx: u32, store: &ElementStore) {
        let Some(el) = self.elements.get(idx as usize) else {
            return;
        };
        let id = ElementId::from_index(idx);
        if let Some(icon) = store.icon(id) {
            el.set_class_name(icon);
            return;
        }
        let next = store.classes(id);
        let prev = core::mem::replace(&mut self.applied[idx as usize], next);
        let list = el.class_list();
        for class in Class::ALL {
            let on = next.contains(class);
            if on != prev.contains(class) {
                let _ = list.toggle_with_force(class.token(), on);
            }
        }
    }

    fn apply_style(&mut self, idx: u32, store: &ElementStore) {
        let Some(el) = self.elements.get(idx as usize) else {
            return;
        };
        let next = *store.style(ElementId::from_index(idx));
        let prev = core::mem::replace(&mut self.applied_styles[idx as usize], next);
        let s = el.style();
        for (property, value) in style_writes(&prev, &next) {
            let _ = match value {
                Some(css) => s.set_property(property, &css),
                None => s.remove_property(property).map(drop),
            };
        }
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, store: &ElementStore, changes: &ElementChanges) {
        // 1. Classes
        for &idx in &changes.classes {
            self.apply_classes(idx, store);
        }

        // 2. Text
        for &idx in &changes.text {
            if let Some(el) = self.get_element(idx) {
                let id = ElementId::from_index(idx);
                el.set_text_content(store.text(id));
            }
        }

        // 3. Inline style
        for &idx in &changes.styles {
            self.apply_style(idx, store);
        }

        // 4. Disabled
        for &idx in &changes.states {
            if let Some(el) = self.get_element(idx) {
                let id = ElementId::from_index(idx);
                let _ = el.toggle_attribute_with_force("disabled", store.is_disabled(id));
            }
        }

        // 5. Programmatic values
        for &idx in &changes.values {
            if let Some(el) = self.get_element(idx) {
                let id = ElementId::from_index(idx);
                set_control_value(el, store.value(id));
            }
        }
    }
}

/// Reads the value of an `<input>`, `<select>`, or `<textarea>`.
pub(crate) fn control_value(el: &HtmlElement) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        el.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
    }
}

fn set_control_value(el: &HtmlElement, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// An inline property write: `Some` sets the value, `None` removes it.
pub(crate) type StyleWrite = (&'static str, Option<String>);

/// Property writes that take an element from `prev`, the style this
/// presenter last applied, to `next`.
///
/// Properties equal in both are left alone, so inline values written by
/// the markup or at build time survive until the store first sets them.
pub(crate) fn style_writes(prev: &InlineStyle, next: &InlineStyle) -> Vec<StyleWrite> {
    let mut writes = Vec::new();
    if prev.transform != next.transform {
        writes.push(("transform", transform_css(next.transform)));
    }
    if prev.width_percent != next.width_percent {
        writes.push(("width", next.width_percent.map(width_css)));
    }
    if prev.highlight != next.highlight {
        let color = match next.highlight {
            Highlight::Accent => Some(String::from(ACCENT)),
            Highlight::None => None,
        };
        writes.push(("color", color));
    }
    if prev.opacity != next.opacity {
        writes.push(("opacity", next.opacity.map(|o| format!("{o}"))));
    }
    if prev.pointer_events != next.pointer_events {
        let events = next
            .pointer_events
            .map(|on| String::from(if on { "all" } else { "none" }));
        writes.push(("pointer-events", events));
    }
    if prev.overflow_hidden != next.overflow_hidden {
        writes.push(("overflow", next.overflow_hidden.then(|| String::from("hidden"))));
    }
    writes
}

/// CSS `transform` value, or `None` to clear the inline property.
pub(crate) fn transform_css(transform: Transform) -> Option<String> {
    match transform {
        Transform::None => None,
        Transform::Translate(v) => Some(format!("translate({}px, {}px)", v.x, v.y)),
        Transform::Tilt(t) => Some(format!(
            "perspective(800px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            t.rotate_x_deg, t.rotate_y_deg, t.lift_px
        )),
    }
}

/// CSS `width` percentage, clamped to the bar's range.
pub(crate) fn width_css(percent: f64) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{clamped}%")
}
