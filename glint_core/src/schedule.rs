// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic timer and frame-callback queue.
//!
//! The page never calls a platform timer directly. Every delayed action is a
//! value pushed into a [`TaskQueue`]: a timer task `T` with a deadline
//! ([`set_timeout`](TaskQueue::set_timeout)) or a frame task `F` for the
//! next repaint ([`request_frame`](TaskQueue::request_frame)). Backends pump the
//! queue: they arm one platform timer for [`next_deadline`] and one
//! animation-frame callback while [`has_frame_requests`] is true. Tests pump
//! it with whatever host times they like.
//!
//! # Ordering
//!
//! - Timers fire in deadline order; equal deadlines fire in the order they
//!   were armed.
//! - A timer is never due before its deadline, so a zero-delay timer armed
//!   inside a handler runs on the next pump, not inside that handler.
//! - [`take_frame_requests`] hands out only the callbacks requested so far;
//!   callbacks requested while those run wait for the following frame.
//!
//! [`next_deadline`]: TaskQueue::next_deadline
//! [`has_frame_requests`]: TaskQueue::has_frame_requests
//! [`take_frame_requests`]: TaskQueue::take_frame_requests

use alloc::vec::Vec;
use core::fmt;

use crate::time::{Duration, HostTime};

/// Identifies a scheduled task so it can be cancelled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

#[derive(Debug)]
struct Timer<T> {
    id: TaskId,
    due: HostTime,
    task: T,
}

/// A queue of delayed tasks `T` and per-frame tasks `F`.
#[derive(Debug)]
pub struct TaskQueue<T, F = T> {
    timers: Vec<Timer<T>>,
    frames: Vec<(TaskId, F)>,
    next_id: u64,
}

impl<T, F> Default for TaskQueue<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> TaskQueue<T, F> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timers: Vec::new(),
            frames: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Schedules `task` to run once `delay` has elapsed after `now`.
    pub fn set_timeout(&mut self, now: HostTime, delay: Duration, task: T) -> TaskId {
        let id = self.allocate_id();
        let due = now.saturating_add(delay);
        // Keep `timers` sorted by (due, id); ids grow monotonically so
        // inserting after every entry with due <= this one keeps FIFO ties.
        let at = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(at, Timer { id, due, task });
        id
    }

    /// Schedules `task` to run before the next repaint.
    pub fn request_frame(&mut self, task: F) -> TaskId {
        let id = self.allocate_id();
        self.frames.push((id, task));
        id
    }

    /// Cancels a pending timer or frame callback.
    ///
    /// Returns `false` if the task already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.timers.iter().position(|t| t.id == id) {
            self.timers.remove(pos);
            return true;
        }
        if let Some(pos) = self.frames.iter().position(|(fid, _)| *fid == id) {
            self.frames.remove(pos);
            return true;
        }
        false
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.first().map(|t| t.due)
    }

    /// Returns `true` while any frame callback is pending.
    #[must_use]
    pub fn has_frame_requests(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Removes and returns the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: HostTime) -> Option<T> {
        if self.timers.first().is_some_and(|t| t.due <= now) {
            Some(self.timers.remove(0).task)
        } else {
            None
        }
    }

    /// Takes every frame callback requested so far, in request order.
    pub fn take_frame_requests(&mut self) -> Vec<F> {
        core::mem::take(&mut self.frames)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` when no timer or frame callback is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.frames.is_empty()
    }
}
