// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared (markup-attached) element attributes.

use alloc::string::String;

/// Configuration values read from markup when an element is registered.
///
/// Values are stored verbatim; interpretation happens at the point of use so
/// a malformed attribute degrades to 0 instead of failing registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Declared delay in milliseconds (`data-delay`).
    pub delay: Option<String>,
    /// Declared counter target (`data-target`).
    pub target: Option<String>,
}

impl Attributes {
    /// Attributes with only a declared delay.
    #[must_use]
    pub fn with_delay(delay: impl Into<String>) -> Self {
        Self {
            delay: Some(delay.into()),
            target: None,
        }
    }

    /// Attributes with only a declared counter target.
    #[must_use]
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            delay: None,
            target: Some(target.into()),
        }
    }

    /// Fills the values this set does not declare from `other`.
    ///
    /// Values already declared are kept.
    pub fn merge(&mut self, other: Self) {
        if self.delay.is_none() {
            self.delay = other.delay;
        }
        if self.target.is_none() {
            self.target = other.target;
        }
    }

    /// Declared delay in milliseconds; missing or malformed values are 0.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay.as_deref().map_or(0, parse_int)
    }

    /// Declared counter target; missing or malformed values are 0.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.target.as_deref().map_or(0, parse_int)
    }
}

/// Parses a declared integer attribute leniently.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// longest run of ASCII digits is taken (`"250+"` is 250, `"12px"` is 12).
/// No digits, a negative value, or overflow yield 0.
#[must_use]
pub fn parse_int(raw: &str) -> u64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(v) => v,
            None => return 0,
        };
    }

    if !seen || negative { 0 } else { value }
}
