// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-triggered UI event orchestration for a marketing page.
//!
//! `glint_core` holds every behaviour of the page as plain data and state
//! machines, with no platform calls. It is `no_std` compatible (with `alloc`)
//! and stores element state in struct-of-arrays form behind index handles.
//!
//! # Architecture
//!
//! Backends feed signals in, pump timers and frames, and present the
//! resulting element changes:
//!
//! ```text
//!   Backend (listeners, observers)
//!       │
//!       ▼
//!   Signal ──► Page::dispatch() ──► Registry (throttles) ──► handlers
//!                                                              │
//!   timer ──► Page::advance() ─┐                               │
//!   frame ──► Page::frame() ───┤◄── TaskQueue ◄────────────────┘
//!                              ▼
//!   ElementStore::evaluate() ──► ElementChanges ──► Presenter::apply()
//! ```
//!
//! **[`element`]**: Struct-of-arrays element store. Controllers write class
//! flags, text, inline style, disabled state, and values; mutations mark
//! [`dirty`] channels that evaluation drains.
//!
//! **[`schedule`]**: Deterministic timer and frame-callback queue.
//!
//! **[`throttle`]**: Leading-edge [`RateLimiter`](throttle::RateLimiter).
//!
//! **[`visibility`]**: One-shot [`VisibilityWatcher`](visibility::VisibilityWatcher)
//! with a degraded mode for hosts without an observation primitive.
//!
//! **[`reveal`]**, **[`counter`]**, **[`scroll`]**, **[`parallax`]**,
//! **[`lightbox`]**, **[`menu`]**, **[`form`]**, **[`typewriter`]**: The
//! page behaviours.
//!
//! **[`registry`]**: Signals and the handler registration table.
//!
//! **[`page`]**: [`Page`](page::Page) wires all of the above together.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) and
//! [`Layout`](backend::Layout) traits that platform backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! orchestration instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod counter;
pub mod dirty;
pub mod element;
pub mod form;
pub mod lightbox;
pub mod menu;
pub mod page;
pub mod parallax;
pub mod registry;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod throttle;
pub mod time;
pub mod trace;
pub mod typewriter;
pub mod visibility;
