// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-loop lifecycle and update throttling.
//!
//! Display refresh rate and update rate are decoupled:
//!
//! - [`FrameLoop`] keeps exactly zero or one frame request outstanding. It is
//!   re-armed after every callback while running, so it ticks at the display
//!   rate (60–120 Hz).
//! - [`FrameGate`] runs the actual work only when a minimum interval has
//!   elapsed since the last executed update, bounding work to e.g. 30 Hz.
//!
//! [`Visibility`] maps page visibility onto start/stop: a hidden page never
//! keeps a loop alive.

use crate::backend::{FrameHandle, FrameScheduler};
use crate::time::{Duration, HostTime};

/// Page visibility as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The document is on screen.
    Visible,
    /// The document is hidden (background tab, minimized, torn down).
    Hidden,
}

impl Visibility {
    /// Maps a `document.hidden` style flag.
    #[inline]
    #[must_use]
    pub const fn from_hidden(hidden: bool) -> Self {
        if hidden { Self::Hidden } else { Self::Visible }
    }
}

/// Tracks the single outstanding frame request of a repeating loop.
///
/// Starting a running loop or stopping a stopped one is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    /// Creates a stopped loop.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` while a frame request is outstanding.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the outstanding request, if any.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Requests the first frame. Returns `false` if already running.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Cancels the outstanding request. Returns `false` if already stopped.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    /// Requests the next frame after a callback ran, if still running.
    ///
    /// The request that just fired is consumed, so no cancel is issued.
    pub fn rearm(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.pending.is_some() {
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Starts or stops the loop to match page visibility.
    ///
    /// Returns `true` if the running state changed.
    pub fn sync_visibility(
        &mut self,
        visibility: Visibility,
        scheduler: &mut impl FrameScheduler,
    ) -> bool {
        match visibility {
            Visibility::Visible => self.start(scheduler),
            Visibility::Hidden => self.stop(scheduler),
        }
    }
}

/// Admits work at most once per `interval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGate {
    interval: Duration,
    last: Option<HostTime>,
}

impl FrameGate {
    /// Creates a gate whose first check always passes.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Minimum spacing between admitted updates.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last admitted update.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> Option<HostTime> {
        self.last
    }

    /// Returns `true` and records `now` if at least `interval` has elapsed
    /// since the last admitted update.
    ///
    /// A clock that steps backwards is treated as zero elapsed time.
    pub fn admit(&mut self, now: HostTime) -> bool {
        let ready = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last = Some(now);
        }
        ready
    }
}
