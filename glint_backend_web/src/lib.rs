// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for glint.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`mount`]: resolves the page document, builds a
//!   [`Page`](glint_core::page::Page), and wires scroll, pointer, click, key,
//!   input, and submit listeners to it
//! - [`AnimationFrame`]: `requestAnimationFrame` slot for counter frames
//! - [`Timeout`]: the single `setTimeout` slot armed for the page's earliest
//!   deadline
//! - [`Observer`]: one `IntersectionObserver` per visibility watcher
//! - [`DomPresenter`]: DOM class, text, style, and control updates

#![no_std]

extern crate alloc;

mod dom;
mod layout;
mod observer;
mod presenter;
mod raf;
mod runtime;
mod timer;

pub use glint_core::backend::Presenter;
pub use observer::Observer;
pub use presenter::DomPresenter;
pub use raf::AnimationFrame;
pub use runtime::{mount, mount_with_sink};
pub use timer::Timeout;

use glint_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    raf::millis_to_host(raf::performance_now())
}
