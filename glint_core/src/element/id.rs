// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity.

use core::fmt;

/// A handle to an element in an [`ElementStore`](super::ElementStore).
///
/// Handles are dense indices in registration order, so sorting handles sorts
/// elements by document order whenever they were registered in document
/// order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Rebuilds a handle from a raw slot index.
    ///
    /// Backends use this to map an index stored on a DOM node back to the
    /// handle. The store panics on indices it never issued.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: u32) -> Self {
        Self(idx)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}
