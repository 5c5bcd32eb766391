// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Element mutations are tracked per category with [`understory_dirty`] so a
//! presenter only touches the DOM properties that actually changed. Page
//! elements form a flat set (no inherited properties), so every channel is
//! local-only: marking an element never marks any other element.
//!
//! Callers never query dirty state directly.
//! [`ElementStore::evaluate`](crate::element::ElementStore::evaluate) drains
//! every channel and reports the result as
//! [`ElementChanges`](crate::element::ElementChanges), which backends
//! [consume](crate::backend::Presenter::apply).

use understory_dirty::Channel;

/// Class-list flags changed (`revealed`, `scrolled`, `visible`, ...).
pub const CLASS: Channel = Channel::new(0);

/// Text content changed (counter value, caption, typed badge text).
pub const TEXT: Channel = Channel::new(1);

/// Inline style changed (transform, width, colour, opacity, overflow).
pub const STYLE: Channel = Channel::new(2);

/// Control state changed (`disabled`).
pub const STATE: Channel = Channel::new(3);

/// A form control value was written programmatically (form reset).
pub const VALUE: Channel = Channel::new(4);
