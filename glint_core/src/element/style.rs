// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presented element state: class flags and inline style.

use kurbo::Vec2;

/// A class-list token the orchestrator toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Class {
    /// Terminal reveal state (`revealed`).
    Revealed,
    /// Navbar past the scroll threshold (`scrolled`).
    Scrolled,
    /// Back-to-top button shown (`visible`).
    Visible,
    /// Hamburger control in its open state (`active`).
    Active,
    /// Navigation link list expanded (`open`).
    Open,
    /// Form control failed validation (`error`).
    Error,
    /// Success indicator shown (`show`).
    Show,
}

impl Class {
    /// Every class, in presentation order.
    pub const ALL: [Self; 7] = [
        Self::Revealed,
        Self::Scrolled,
        Self::Visible,
        Self::Active,
        Self::Open,
        Self::Error,
        Self::Show,
    ];

    /// The class-list token written to the DOM.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Revealed => "revealed",
            Self::Scrolled => "scrolled",
            Self::Visible => "visible",
            Self::Active => "active",
            Self::Open => "open",
            Self::Error => "error",
            Self::Show => "show",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Revealed => 1 << 0,
            Self::Scrolled => 1 << 1,
            Self::Visible => 1 << 2,
            Self::Active => 1 << 3,
            Self::Open => 1 << 4,
            Self::Error => 1 << 5,
            Self::Show => 1 << 6,
        }
    }
}

/// The set of [`Class`] tokens currently applied to an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassFlags(u8);

impl ClassFlags {
    /// Returns whether `class` is applied.
    #[inline]
    #[must_use]
    pub const fn contains(self, class: Class) -> bool {
        self.0 & class.bit() != 0
    }

    /// Returns a copy with `class` applied or removed.
    #[inline]
    #[must_use]
    pub const fn with(self, class: Class, on: bool) -> Self {
        if on {
            Self(self.0 | class.bit())
        } else {
            Self(self.0 & !class.bit())
        }
    }

    /// Iterates over applied classes.
    pub fn iter(self) -> impl Iterator<Item = Class> {
        Class::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

/// Card tilt produced by the pointer-over-card effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    /// Rotation around the X axis, in degrees.
    pub rotate_x_deg: f64,
    /// Rotation around the Y axis, in degrees.
    pub rotate_y_deg: f64,
    /// Vertical lift in pixels (negative moves up).
    pub lift_px: f64,
}

/// An inline `transform` value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Transform {
    /// No inline transform (stylesheet value applies).
    #[default]
    None,
    /// A 2D translation in pixels.
    Translate(Vec2),
    /// A perspective tilt with lift.
    Tilt(Tilt),
}

/// Navigation-link highlight colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Stylesheet colour.
    #[default]
    None,
    /// The accent colour marking the active section's link.
    Accent,
}

/// Inline style properties the orchestrator writes.
///
/// `None` means "property not set inline" so the stylesheet value applies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InlineStyle {
    /// `transform`.
    pub transform: Transform,
    /// `width`, as a percentage.
    pub width_percent: Option<f64>,
    /// `color`.
    pub highlight: Highlight,
    /// `opacity`.
    pub opacity: Option<f64>,
    /// `pointer-events`: `Some(true)` is `all`, `Some(false)` is `none`.
    pub pointer_events: Option<bool>,
    /// `overflow: hidden` (document scroll lock when set on the body).
    pub overflow_hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_toggle_independently() {
        let f = ClassFlags::default()
            .with(Class::Revealed, true)
            .with(Class::Show, true);
        assert!(f.contains(Class::Revealed));
        assert!(f.contains(Class::Show));
        assert!(!f.contains(Class::Error));

        let f = f.with(Class::Revealed, false);
        assert!(!f.contains(Class::Revealed));
        assert_eq!(f.iter().collect::<alloc::vec::Vec<_>>(), [Class::Show]);
    }
}
