// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven effects: background parallax and card tilt.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::element::{ElementId, ElementStore, Tilt, Transform};

/// Pointer offset from the viewport centre, normalized so the viewport edges
/// are ±1 on each axis.
///
/// A zero-sized viewport axis yields 0 on that axis.
#[must_use]
pub fn normalized_offset(pointer: Point, viewport: Size) -> Vec2 {
    let cx = viewport.width / 2.0;
    let cy = viewport.height / 2.0;
    let axis = |v: f64, c: f64| if c > 0.0 { (v - c) / c } else { 0.0 };
    Vec2::new(axis(pointer.x, cx), axis(pointer.y, cy))
}

/// Moves decorative shapes proportionally to the pointer offset.
///
/// Shape `i` (0-based) translates by `offset * (i + 1) * step` pixels.
#[derive(Clone, Debug)]
pub struct PointerParallaxTracker {
    shapes: Vec<ElementId>,
    step_px: f64,
}

impl PointerParallaxTracker {
    /// Creates a tracker over `shapes` in document order.
    #[must_use]
    pub fn new(shapes: Vec<ElementId>, step_px: f64) -> Self {
        Self { shapes, step_px }
    }

    /// Translation applied to shape `index` for a normalized offset.
    #[must_use]
    pub fn translation(&self, index: usize, offset: Vec2) -> Vec2 {
        offset * ((index + 1) as f64 * self.step_px)
    }

    /// Applies the translation for a pointer position to every shape.
    ///
    /// Returns the normalized offset.
    pub fn update(&self, store: &mut ElementStore, pointer: Point, viewport: Size) -> Vec2 {
        let offset = normalized_offset(pointer, viewport);
        for (i, shape) in self.shapes.iter().enumerate() {
            store.set_transform(*shape, Transform::Translate(self.translation(i, offset)));
        }
        offset
    }
}

/// Limits for the card tilt effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Rotation at the card edge, in degrees.
    pub max_deg: f64,
    /// Upward lift while tilted, in pixels.
    pub lift_px: f64,
}

/// Tilt for a pointer over `card` (both viewport-relative).
///
/// The pointer above the centre tilts the top edge away; left of the centre
/// turns the card towards the pointer. Zero-sized cards do not rotate.
#[must_use]
pub fn card_tilt(pointer: Point, card: Rect, config: TiltConfig) -> Tilt {
    let local = pointer - card.origin();
    let cx = card.width() / 2.0;
    let cy = card.height() / 2.0;
    let ratio = |v: f64, c: f64| if c > 0.0 { (v - c) / c } else { 0.0 };
    Tilt {
        rotate_x_deg: ratio(local.y, cy) * config.max_deg,
        rotate_y_deg: -ratio(local.x, cx) * config.max_deg,
        lift_px: -config.lift_px,
    }
}
