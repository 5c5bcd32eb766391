// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, JSON-lines, and in-memory recording for glint
//! diagnostics.
//!
//! This crate provides [`TraceSink`](glint_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`jsonl::JsonLinesSink`]: one JSON object per event, for log pipelines
//!   and `jq`.
//! - [`recorder::RecorderSink`]: owned copies of every event, for assertions
//!   and replay into another sink.

pub mod jsonl;
pub mod pretty;
pub mod recorder;
