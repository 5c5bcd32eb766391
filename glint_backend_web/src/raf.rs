// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` callback slot.
//!
//! [`AnimationFrame`] holds at most one pending `requestAnimationFrame`
//! registration. Counter animations need a frame only while a run is in
//! flight, so the slot is requested on demand rather than looping. Each
//! callback receives the [`DOMHighResTimeStamp`][mdn] (milliseconds from
//! `performance.now()`) converted to microsecond [`HostTime`] ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use glint_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods, so the hot
// path never fetches (and unwraps) the Window/Performance objects.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A one-shot `requestAnimationFrame` registration that can be re-requested.
///
/// [`request`](Self::request) is idempotent while a frame is pending. The
/// callback runs once per granted frame; request again from inside it to
/// keep animating.
pub struct AnimationFrame {
    inner: Rc<FrameInner>,
}

type FrameClosure = Closure<dyn FnMut(f64)>;

struct FrameInner {
    /// The JS closure handed to `requestAnimationFrame`. Created once and
    /// reused for every request.
    closure: RefCell<Option<FrameClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut(HostTime)>>,

    /// ID of the pending request, if any.
    pending: Cell<Option<i32>>,
}

impl AnimationFrame {
    /// Creates a slot with nothing requested.
    pub fn new(callback: impl FnMut(HostTime) + 'static) -> Self {
        let inner = Rc::new(FrameInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            // Scoped so a request from inside the callback only touches the
            // `closure` and `pending` cells.
            inner.callback.borrow_mut()(millis_to_host(timestamp_ms));
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests the next frame unless one is already pending.
    pub fn request(&self) {
        if self.inner.pending.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.pending.set(Some(id));
        }
    }

    /// Cancels the pending request, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }

    /// Returns `true` while a frame is requested and not yet delivered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for AnimationFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationFrame")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

/// Converts a `DOMHighResTimeStamp` to microsecond ticks.
pub(crate) fn millis_to_host(ms: f64) -> HostTime {
    if ms.is_nan() || ms <= 0.0 {
        return HostTime(0);
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "positive timestamp in µs fits in u64; float-to-int casts saturate"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}
