// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page configuration.

use crate::counter::CounterGroupConfig;
use crate::parallax::TiltConfig;
use crate::scroll::ScrollConfig;
use crate::time::Duration;
use crate::visibility::{ObserverOptions, RootMargin};

/// Tunables for every page behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Scroll thresholds and section probe offset.
    pub scroll: ScrollConfig,
    /// Minimum spacing of the chrome pass (navbar, back-to-top, progress).
    pub chrome_throttle: Duration,
    /// Minimum spacing of the section highlight pass.
    pub highlight_throttle: Duration,
    /// Minimum spacing of the parallax pass.
    pub pointer_throttle: Duration,
    /// Translation per unit offset for the first parallax shape.
    pub parallax_step_px: f64,
    /// Reveal watcher options.
    pub reveal: ObserverOptions,
    /// Hero counter group.
    pub hero: CounterGroupConfig,
    /// Statistics grid counter group.
    pub grid: CounterGroupConfig,
    /// Simulated form submission latency.
    pub submit_delay: Duration,
    /// Delay before the hero badge starts retyping.
    pub typewriter_start: Duration,
    /// Delay between retyped characters.
    pub typewriter_step: Duration,
    /// Space left above an anchor target for the fixed navbar.
    pub anchor_offset: f64,
    /// Card tilt limits.
    pub tilt: TiltConfig,
    /// Lightbox caption for gallery items without one.
    pub gallery_caption: &'static str,
    /// Lightbox icon for gallery items.
    pub gallery_icon: &'static str,
}

impl PageConfig {
    /// The values the school page ships with.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            scroll: ScrollConfig {
                navbar_threshold: 60.0,
                back_to_top_threshold: 500.0,
                probe_offset: 100.0,
            },
            chrome_throttle: Duration::from_millis(50),
            highlight_throttle: Duration::from_millis(100),
            pointer_throttle: Duration::from_millis(30),
            parallax_step_px: 8.0,
            reveal: ObserverOptions {
                threshold: 0.12,
                root_margin: RootMargin::bottom(-60.0),
            },
            hero: CounterGroupConfig {
                observer: ObserverOptions::threshold(0.5),
                duration: Duration::from_millis(2200),
                declared_delay: false,
            },
            grid: CounterGroupConfig {
                observer: ObserverOptions::threshold(0.4),
                duration: Duration::from_millis(2500),
                declared_delay: true,
            },
            submit_delay: Duration::from_millis(1800),
            typewriter_start: Duration::from_millis(1600),
            typewriter_step: Duration::from_millis(38),
            anchor_offset: 80.0,
            tilt: TiltConfig {
                max_deg: 5.0,
                lift_px: 8.0,
            },
            gallery_caption: "School Gallery",
            gallery_icon: "fas fa-image",
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::standard()
    }
}
