// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single re-armable `setTimeout` slot.
//!
//! The page keeps its own deadline queue, so the browser only ever needs one
//! timer: armed for the earliest deadline, re-armed after every entry point.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use glint_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// One `setTimeout` registration, replaced on every [`arm`](Self::arm).
pub struct Timeout {
    inner: Rc<TimeoutInner>,
}

struct TimeoutInner {
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
    callback: RefCell<Box<dyn FnMut()>>,
    armed: Cell<Option<i32>>,
}

impl Timeout {
    /// Creates a disarmed timer.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(TimeoutInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            armed: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.armed.set(None);
            inner.callback.borrow_mut()();
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms the timer to fire after `delay`, replacing any earlier arming.
    pub fn arm(&self, delay: Duration) {
        self.clear();
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref().unchecked_ref(), delay_ms(delay));
            self.inner.armed.set(Some(id));
        }
    }

    /// Disarms the timer.
    pub fn clear(&self) {
        if let Some(id) = self.inner.armed.take() {
            clear_timeout(id);
        }
    }

    /// Returns `true` while armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.armed.get().is_some()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.clear();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("armed", &self.inner.armed.get())
            .finish_non_exhaustive()
    }
}

/// Whole milliseconds for `setTimeout`, rounded up so a timer never fires
/// before its deadline.
fn delay_ms(delay: Duration) -> i32 {
    let ms = delay.ticks().div_ceil(1000);
    i32::try_from(ms).unwrap_or(i32::MAX)
}
