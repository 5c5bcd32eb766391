// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wrapper for one watcher group.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use glint_core::visibility::{ObserverOptions, RootMargin};

/// A raw intersection report, before the element is mapped to a handle.
#[derive(Clone, Debug)]
pub(crate) struct RawEntry {
    pub(crate) target: Element,
    pub(crate) is_intersecting: bool,
    pub(crate) ratio: f64,
    pub(crate) time_ms: f64,
}

type EntriesClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// One `IntersectionObserver` and the closure it calls back into.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: EntriesClosure,
}

impl core::fmt::Debug for Observer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}

impl Observer {
    /// Creates an observer with `options`; `on_entries` receives each
    /// delivered batch in order.
    pub(crate) fn new(
        options: ObserverOptions,
        mut on_entries: impl FnMut(Vec<RawEntry>) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| RawEntry {
                    target: e.target(),
                    is_intersecting: e.is_intersecting(),
                    ratio: e.intersection_ratio(),
                    time_ms: e.time(),
                })
                .collect();
            on_entries(batch);
        }) as Box<dyn FnMut(_, _)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&root_margin_css(options.root_margin));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts observing `element`.
    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    /// Stops observing `element`.
    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Returns `true` when the host exposes `IntersectionObserver`.
pub(crate) fn is_supported(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Formats a margin as a CSS `rootMargin` string (top right bottom left).
pub(crate) fn root_margin_css(m: RootMargin) -> String {
    format!("{}px {}px {}px {}px", m.top, m.right, m.bottom, m.left)
}
