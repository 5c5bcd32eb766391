// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-reveal: a terminal `revealed` class applied after a declared delay.

use crate::element::{Attributes, Class, ElementId, ElementStore};
use crate::time::Duration;

/// Applies the terminal reveal state to elements that became visible.
///
/// There is no rollback: once revealed, an element stays revealed for the
/// page's lifetime.
#[derive(Clone, Debug, Default)]
pub struct RevealController {
    revealed: usize,
}

impl RevealController {
    /// Creates a controller that has revealed nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { revealed: 0 }
    }

    /// Delay between becoming visible and being revealed, from the
    /// element's declared `delay` (0 when missing or malformed).
    #[must_use]
    pub fn delay_for(attrs: &Attributes) -> Duration {
        Duration::from_millis(attrs.delay_ms())
    }

    /// Applies the revealed state.
    ///
    /// Returns `false` if the element was already revealed.
    pub fn reveal(&mut self, store: &mut ElementStore, element: ElementId) -> bool {
        if store.has_class(element, Class::Revealed) {
            return false;
        }
        store.set_class(element, Class::Revealed, true);
        self.revealed += 1;
        true
    }

    /// Number of elements revealed so far.
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }
}
