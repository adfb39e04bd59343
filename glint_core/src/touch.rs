// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom suppression for touch-constrained browsers.
//!
//! Mobile Safari ignores `user-scalable=no`, so double-tap and pinch zoom are
//! blocked at the event level instead. The decisions live here; the web
//! backend only calls `preventDefault` when told to.

use crate::time::{Duration, HostTime};

/// Double-tap detection window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoubleTapConfig {
    /// Two touch-ends closer than this form a double tap.
    pub window: Duration,
}

impl Default for DoubleTapConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(300),
        }
    }
}

/// Flags the second touch-end of a double tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoubleTapGuard {
    config: DoubleTapConfig,
    last_end: Option<HostTime>,
}

impl DoubleTapGuard {
    /// Creates a guard with no previous tap.
    #[must_use]
    pub const fn new(config: DoubleTapConfig) -> Self {
        Self {
            config,
            last_end: None,
        }
    }

    /// Records a touch-end. Returns `true` if it should be suppressed.
    pub fn touch_end(&mut self, now: HostTime) -> bool {
        let double = self.last_end.is_some_and(|last| {
            now >= last && now.saturating_duration_since(last) < self.config.window
        });
        self.last_end = Some(now);
        double
    }
}

/// Whether a touch move should be suppressed: any move with more than one
/// finger down is a pinch.
#[inline]
#[must_use]
pub const fn suppress_touch_move(touch_count: u32) -> bool {
    touch_count > 1
}
