// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with change tracking.

use alloc::string::String;
use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use super::attr::Attributes;
use super::id::ElementId;
use super::style::{Class, ClassFlags, Highlight, InlineStyle, Transform};
use crate::dirty;

/// Struct-of-arrays storage for all registered page elements.
#[derive(Debug)]
pub struct ElementStore {
    // -- Identity --
    pub(crate) key: Vec<String>,
    pub(crate) attrs: Vec<Attributes>,

    // -- Presented state --
    pub(crate) classes: Vec<ClassFlags>,
    pub(crate) icon: Vec<Option<String>>,
    pub(crate) text: Vec<Option<String>>,
    pub(crate) style: Vec<InlineStyle>,
    pub(crate) disabled: Vec<bool>,
    pub(crate) value: Vec<String>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: Vec::new(),
            attrs: Vec::new(),
            classes: Vec::new(),
            icon: Vec::new(),
            text: Vec::new(),
            style: Vec::new(),
            disabled: Vec::new(),
            value: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Registration --

    /// Registers an element with no declared attributes.
    ///
    /// `key` is the DOM identifier or selector the backend resolved it from;
    /// it is kept for diagnostics only.
    pub fn register(&mut self, key: impl Into<String>) -> ElementId {
        self.register_with(key, Attributes::default())
    }

    /// Registers an element with declared attributes.
    pub fn register_with(&mut self, key: impl Into<String>, attrs: Attributes) -> ElementId {
        let idx = u32::try_from(self.key.len()).expect("element count exceeds u32");
        self.key.push(key.into());
        self.attrs.push(attrs);
        self.classes.push(ClassFlags::default());
        self.icon.push(None);
        self.text.push(None);
        self.style.push(InlineStyle::default());
        self.disabled.push(false);
        self.value.push(String::new());
        ElementId(idx)
    }

    /// Adds attributes declared for another role of an element that is
    /// already registered. Values it already declares are kept.
    pub fn declare(&mut self, id: ElementId, attrs: Attributes) {
        let slot = self.slot(id);
        self.attrs[slot].merge(attrs);
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Iterates over all handles in registration order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "registration caps the element count at u32"
    )]
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.key.len()).map(|i| ElementId(i as u32))
    }

    // -- Identity accessors --

    /// The DOM key the element was registered under.
    #[must_use]
    pub fn key(&self, id: ElementId) -> &str {
        &self.key[self.slot(id)]
    }

    /// Declared attributes.
    #[must_use]
    pub fn attributes(&self, id: ElementId) -> &Attributes {
        &self.attrs[self.slot(id)]
    }

    // -- Class flags --

    /// Current class flags.
    #[must_use]
    pub fn classes(&self, id: ElementId) -> ClassFlags {
        self.classes[self.slot(id)]
    }

    /// Returns whether `class` is applied.
    #[must_use]
    pub fn has_class(&self, id: ElementId, class: Class) -> bool {
        self.classes(id).contains(class)
    }

    /// Applies or removes a class.
    pub fn set_class(&mut self, id: ElementId, class: Class, on: bool) {
        let slot = self.slot(id);
        let next = self.classes[slot].with(class, on);
        if next != self.classes[slot] {
            self.classes[slot] = next;
            self.dirty.mark(id.0, dirty::CLASS);
        }
    }

    /// Icon class list, for icon glyph elements whose whole class attribute
    /// is replaced rather than toggled.
    #[must_use]
    pub fn icon(&self, id: ElementId) -> Option<&str> {
        self.icon[self.slot(id)].as_deref()
    }

    /// Replaces the icon class list.
    pub fn set_icon(&mut self, id: ElementId, icon: impl Into<String>) {
        let slot = self.slot(id);
        let icon = icon.into();
        if self.icon[slot].as_deref() != Some(icon.as_str()) {
            self.icon[slot] = Some(icon);
            self.dirty.mark(id.0, dirty::CLASS);
        }
    }

    // -- Text --

    /// Current text override, if any.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.text[self.slot(id)].as_deref()
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        let slot = self.slot(id);
        let text = text.into();
        if self.text[slot].as_deref() != Some(text.as_str()) {
            self.text[slot] = Some(text);
            self.dirty.mark(id.0, dirty::TEXT);
        }
    }

    /// Appends one character to the text content.
    pub fn push_text(&mut self, id: ElementId, ch: char) {
        let slot = self.slot(id);
        self.text[slot].get_or_insert_with(String::new).push(ch);
        self.dirty.mark(id.0, dirty::TEXT);
    }

    // -- Inline style --

    /// Current inline style.
    #[must_use]
    pub fn style(&self, id: ElementId) -> &InlineStyle {
        &self.style[self.slot(id)]
    }

    /// Sets the inline transform.
    pub fn set_transform(&mut self, id: ElementId, transform: Transform) {
        self.update_style(id, |s| s.transform = transform);
    }

    /// Sets the inline width percentage.
    pub fn set_width_percent(&mut self, id: ElementId, width: Option<f64>) {
        self.update_style(id, |s| s.width_percent = width);
    }

    /// Sets the highlight colour.
    pub fn set_highlight(&mut self, id: ElementId, highlight: Highlight) {
        self.update_style(id, |s| s.highlight = highlight);
    }

    /// Sets the inline opacity.
    pub fn set_opacity(&mut self, id: ElementId, opacity: Option<f64>) {
        self.update_style(id, |s| s.opacity = opacity);
    }

    /// Sets `pointer-events`.
    pub fn set_pointer_events(&mut self, id: ElementId, enabled: Option<bool>) {
        self.update_style(id, |s| s.pointer_events = enabled);
    }

    /// Sets `overflow: hidden`.
    pub fn set_overflow_hidden(&mut self, id: ElementId, hidden: bool) {
        self.update_style(id, |s| s.overflow_hidden = hidden);
    }

    fn update_style(&mut self, id: ElementId, f: impl FnOnce(&mut InlineStyle)) {
        let slot = self.slot(id);
        let before = self.style[slot];
        f(&mut self.style[slot]);
        if self.style[slot] != before {
            self.dirty.mark(id.0, dirty::STYLE);
        }
    }

    // -- Control state --

    /// Returns whether the control is disabled.
    #[must_use]
    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.disabled[self.slot(id)]
    }

    /// Enables or disables the control.
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        let slot = self.slot(id);
        if self.disabled[slot] != disabled {
            self.disabled[slot] = disabled;
            self.dirty.mark(id.0, dirty::STATE);
        }
    }

    // -- Form values --

    /// Current control value.
    #[must_use]
    pub fn value(&self, id: ElementId) -> &str {
        &self.value[self.slot(id)]
    }

    /// Records a value the user typed. The DOM already shows it, so nothing
    /// is marked.
    pub fn record_value(&mut self, id: ElementId, value: impl Into<String>) {
        let slot = self.slot(id);
        self.value[slot] = value.into();
    }

    /// Writes a value programmatically; the presenter must push it to the DOM.
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        let slot = self.slot(id);
        let value = value.into();
        if self.value[slot] != value {
            self.value[slot] = value;
            self.dirty.mark(id.0, dirty::VALUE);
        }
    }

    /// Maps a handle to its slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this store.
    fn slot(&self, id: ElementId) -> usize {
        let slot = id.0 as usize;
        assert!(slot < self.key.len(), "unknown element {id:?}");
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Tilt;

    #[test]
    fn registration_is_dense_and_ordered() {
        let mut store = ElementStore::new();
        let a = store.register("navbar");
        let b = store.register_with("stat", Attributes::with_target("250"));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.key(b), "stat");
        assert_eq!(store.attributes(b).target(), 250);
        assert_eq!(store.ids().collect::<Vec<_>>(), [a, b]);
    }

    #[test]
    fn later_roles_add_attributes() {
        let mut store = ElementStore::new();
        let section = store.register("about");
        store.declare(section, Attributes::with_delay("200"));
        assert_eq!(store.attributes(section).delay_ms(), 200);

        store.declare(section, Attributes::with_delay("500"));
        assert_eq!(store.attributes(section).delay_ms(), 200);
        assert!(store.evaluate().is_empty());
    }

    #[test]
    fn unchanged_writes_mark_nothing() {
        let mut store = ElementStore::new();
        let el = store.register("card");
        let _ = store.evaluate();

        store.set_class(el, Class::Revealed, false);
        store.set_transform(el, Transform::None);
        store.set_disabled(el, false);
        store.set_value(el, "");
        let changes = store.evaluate();
        assert!(changes.is_empty());

        store.set_transform(
            el,
            Transform::Tilt(Tilt {
                rotate_x_deg: 1.0,
                rotate_y_deg: -1.0,
                lift_px: -8.0,
            }),
        );
        let changes = store.evaluate();
        assert_eq!(changes.styles, [0]);
    }

    #[test]
    fn recorded_values_are_not_presented() {
        let mut store = ElementStore::new();
        let input = store.register("phone");
        store.record_value(input, "98765");
        assert_eq!(store.value(input), "98765");
        assert!(store.evaluate().values.is_empty());

        store.set_value(input, "");
        assert_eq!(store.evaluate().values, [0]);
    }

    #[test]
    #[should_panic(expected = "unknown element")]
    fn foreign_handle_panics() {
        let store = ElementStore::new();
        let _ = store.classes(ElementId::from_index(3));
    }
}
