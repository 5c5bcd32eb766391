// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draining dirty channels into a presentable change set.

use alloc::vec::Vec;

use super::store::ElementStore;
use crate::dirty;

/// The set of elements whose presented state changed since the last
/// [`ElementStore::evaluate`] call, grouped by property category.
///
/// Each list holds element slot indices in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementChanges {
    /// Elements whose class flags changed.
    pub classes: Vec<u32>,
    /// Elements whose text content changed.
    pub text: Vec<u32>,
    /// Elements whose inline style changed.
    pub styles: Vec<u32>,
    /// Elements whose `disabled` flag changed.
    pub states: Vec<u32>,
    /// Form controls whose value was written programmatically.
    pub values: Vec<u32>,
}

impl ElementChanges {
    /// Returns `true` when nothing needs presenting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.text.is_empty()
            && self.styles.is_empty()
            && self.states.is_empty()
            && self.values.is_empty()
    }

    /// Clears all lists, keeping their allocations.
    pub fn clear(&mut self) {
        self.classes.clear();
        self.text.clear();
        self.styles.clear();
        self.states.clear();
        self.values.clear();
    }
}

impl ElementStore {
    /// Drains every dirty channel and returns what changed.
    pub fn evaluate(&mut self) -> ElementChanges {
        let mut changes = ElementChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut ElementChanges) {
        changes.clear();
        changes
            .classes
            .extend(self.dirty.drain(dirty::CLASS).deterministic().run());
        changes
            .text
            .extend(self.dirty.drain(dirty::TEXT).deterministic().run());
        changes
            .styles
            .extend(self.dirty.drain(dirty::STYLE).deterministic().run());
        changes
            .states
            .extend(self.dirty.drain(dirty::STATE).deterministic().run());
        changes
            .values
            .extend(self.dirty.drain(dirty::VALUE).deterministic().run());
    }
}
