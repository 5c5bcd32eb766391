// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character-by-character retyping of a text element.

use alloc::string::String;
use alloc::vec::Vec;

use crate::element::{ElementId, ElementStore};

/// Clears an element's text and types it back one character per step.
#[derive(Clone, Debug)]
pub struct Typewriter {
    element: ElementId,
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Captures the element's current text and clears it.
    pub fn start(store: &mut ElementStore, element: ElementId) -> Self {
        let text: Vec<char> = store.text(element).unwrap_or_default().chars().collect();
        store.set_text(element, String::new());
        Self {
            element,
            text,
            typed: 0,
        }
    }

    /// Appends the next character. Returns `true` while more remain.
    pub fn step(&mut self, store: &mut ElementStore) -> bool {
        if let Some(ch) = self.text.get(self.typed) {
            store.push_text(self.element, *ch);
            self.typed += 1;
        }
        !self.is_done()
    }

    /// Returns `true` once the full text is restored.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.typed >= self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retypes_original_text() {
        let mut store = ElementStore::new();
        let badge = store.register("heroBadge");
        store.set_text(badge, "Admissions");

        let mut tw = Typewriter::start(&mut store, badge);
        assert_eq!(store.text(badge), Some(""));
        while tw.step(&mut store) {}
        assert_eq!(store.text(badge), Some("Admissions"));
        assert!(!tw.step(&mut store));
        assert_eq!(store.text(badge), Some("Admissions"));
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut store = ElementStore::new();
        let badge = store.register("heroBadge");
        let mut tw = Typewriter::start(&mut store, badge);
        assert!(tw.is_done());
        assert!(!tw.step(&mut store));
    }
}
