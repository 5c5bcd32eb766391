// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mobile navigation menu and the document scroll lock.

use crate::element::{Class, ElementId, ElementStore};

/// Something that can hold the document scroll lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockHolder {
    /// The gallery lightbox.
    Lightbox,
    /// The expanded navigation menu.
    Menu,
}

/// Document scroll lock shared by overlays.
///
/// The body gets `overflow: hidden` exactly while at least one holder holds
/// the lock, so releasing one overlay never unlocks scrolling under another.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollLock {
    body: Option<ElementId>,
    lightbox: bool,
    menu: bool,
}

impl ScrollLock {
    /// Creates an unlocked lock presented on `body`.
    #[must_use]
    pub const fn new(body: Option<ElementId>) -> Self {
        Self {
            body,
            lightbox: false,
            menu: false,
        }
    }

    /// Takes or releases the lock for `holder`.
    pub fn set(&mut self, store: &mut ElementStore, holder: LockHolder, held: bool) {
        match holder {
            LockHolder::Lightbox => self.lightbox = held,
            LockHolder::Menu => self.menu = held,
        }
        if let Some(body) = self.body {
            store.set_overflow_hidden(body, self.is_locked());
        }
    }

    /// Returns whether `holder` holds the lock.
    #[must_use]
    pub const fn is_held_by(&self, holder: LockHolder) -> bool {
        match holder {
            LockHolder::Lightbox => self.lightbox,
            LockHolder::Menu => self.menu,
        }
    }

    /// Returns whether scrolling is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.lightbox || self.menu
    }
}

/// The hamburger-toggled navigation link list.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavMenu {
    hamburger: Option<ElementId>,
    links: Option<ElementId>,
    open: bool,
}

impl NavMenu {
    /// Creates a closed menu.
    #[must_use]
    pub const fn new(hamburger: Option<ElementId>, links: Option<ElementId>) -> Self {
        Self {
            hamburger,
            links,
            open: false,
        }
    }

    /// Returns `true` while expanded.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the menu and returns the new state.
    pub fn toggle(&mut self, store: &mut ElementStore) -> bool {
        self.set(store, !self.open);
        self.open
    }

    /// Collapses the menu. Returns `false` if it was already closed.
    pub fn close(&mut self, store: &mut ElementStore) -> bool {
        if !self.open {
            return false;
        }
        self.set(store, false);
        true
    }

    fn set(&mut self, store: &mut ElementStore, open: bool) {
        self.open = open;
        if let Some(h) = self.hamburger {
            store.set_class(h, Class::Active, open);
        }
        if let Some(l) = self.links {
            store.set_class(l, Class::Open, open);
        }
    }
}
