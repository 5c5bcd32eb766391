// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery lightbox: a two-state overlay showing one caption and icon.

use alloc::string::String;

use crate::element::{ElementId, ElementStore};

/// Lightbox state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    /// Hidden and click-through.
    #[default]
    Closed,
    /// Shown with a caption and icon token.
    Open {
        /// Caption text.
        caption: String,
        /// Icon class list.
        icon: String,
    },
}

/// What closed the lightbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloseTrigger {
    /// The close control.
    CloseButton,
    /// A click on the overlay itself (not its content).
    Backdrop,
    /// The Escape key.
    Escape,
}

/// Result of [`LightboxController::open`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpenOutcome {
    /// Closed to open.
    Opened,
    /// Already open; caption and icon were replaced.
    Replaced,
}

/// The elements the lightbox drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightboxElements {
    /// The full-screen overlay.
    pub overlay: ElementId,
    /// Caption text holder.
    pub caption: Option<ElementId>,
    /// Icon glyph.
    pub icon: Option<ElementId>,
}

/// Opens and closes the gallery lightbox.
///
/// The overlay is presented fully opaque and interactive exactly while the
/// state is [`Open`](LightboxState::Open). The document scroll lock is held
/// by the page alongside the state.
#[derive(Clone, Debug, Default)]
pub struct LightboxController {
    state: LightboxState,
    elements: Option<LightboxElements>,
}

impl LightboxController {
    /// Creates a closed lightbox. Without elements, state still changes but
    /// nothing is presented.
    #[must_use]
    pub fn new(elements: Option<LightboxElements>) -> Self {
        Self {
            state: LightboxState::Closed,
            elements,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    /// Returns `true` while open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    /// Shows the lightbox with `caption` and `icon`, replacing both if it is
    /// already open.
    pub fn open(
        &mut self,
        store: &mut ElementStore,
        caption: impl Into<String>,
        icon: impl Into<String>,
    ) -> OpenOutcome {
        let outcome = if self.is_open() {
            OpenOutcome::Replaced
        } else {
            OpenOutcome::Opened
        };
        let caption = caption.into();
        let icon = icon.into();
        if let Some(els) = self.elements {
            if let Some(el) = els.caption {
                store.set_text(el, caption.clone());
            }
            if let Some(el) = els.icon {
                store.set_icon(el, icon.clone());
            }
            store.set_opacity(els.overlay, Some(1.0));
            store.set_pointer_events(els.overlay, Some(true));
        }
        self.state = LightboxState::Open { caption, icon };
        outcome
    }

    /// Hides the lightbox.
    ///
    /// Returns `false` (and changes nothing) if it was already closed.
    pub fn close(&mut self, store: &mut ElementStore) -> bool {
        if !self.is_open() {
            return false;
        }
        if let Some(els) = self.elements {
            store.set_opacity(els.overlay, Some(0.0));
            store.set_pointer_events(els.overlay, Some(false));
        }
        self.state = LightboxState::Closed;
        true
    }
}
