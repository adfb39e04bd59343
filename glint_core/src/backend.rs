// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! `glint_core` owns the state machines; a backend crate owns the platform.
//! Each backend provides:
//!
//! - **Capabilities**: a one-shot query producing
//!   [`Capabilities`](crate::capability::Capabilities).
//!
//! - **Time**: a `now() -> HostTime` free function reading the page clock.
//!
//! - **Frame scheduling**: implements [`FrameScheduler`] so a
//!   [`FrameLoop`](crate::pacing::FrameLoop) can request and cancel
//!   per-refresh callbacks (e.g. `requestAnimationFrame`).
//!
//! - **Surfaces**: implements [`AmbientSurface`] and [`LightboxView`] to
//!   apply state-machine output to native elements (e.g. DOM styles).
//!
//! - **Completion waits**: awaits the end of each animated
//!   [`ImagePlacement`] before feeding it back through
//!   [`Lightbox::transition_finished`](crate::lightbox::Lightbox::transition_finished).
//!
//! Every trait here is small enough to fake in tests: the state machines are
//! driven natively by recording doubles.

use kurbo::Vec2;

use crate::time::Duration;

/// Identifies one pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Schedules callbacks before the next display refresh.
pub trait FrameScheduler {
    /// Requests one callback for the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a previously requested callback.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// One independently committed ambient drift channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriftChannel {
    /// Horizontal offset, in CSS pixels.
    X,
    /// Vertical offset, in CSS pixels.
    Y,
    /// Rotation, in degrees.
    Rotation,
}

impl DriftChannel {
    /// All channels in commit order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Rotation];
}

/// Receives ambient driver output.
pub trait AmbientSurface {
    /// Writes one drift channel.
    fn write_drift(&mut self, channel: DriftChannel, value: f64);

    /// Writes both turbulence frequency components.
    fn write_turbulence(&mut self, frequency: Vec2);
}

/// How a placement change should reach the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Apply without a transition.
    Immediate,
    /// Animate over the given duration; completion is reported back.
    Animated(Duration),
}

/// Horizontal offset and opacity of the displayed lightbox image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePlacement {
    /// Horizontal translation in CSS pixels.
    pub offset_x: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Whether the change is animated.
    pub motion: Motion,
}

impl ImagePlacement {
    /// Resting placement with no drag visuals.
    pub const NEUTRAL: Self = Self {
        offset_x: 0.0,
        opacity: 1.0,
        motion: Motion::Immediate,
    };
}

/// Applies lightbox state to a native view.
///
/// `Trigger` is whatever the backend uses to hand focus back to the element
/// that opened the lightbox.
pub trait LightboxView {
    /// Element that regains focus when the lightbox closes.
    type Trigger;

    /// Shows or hides the lightbox container.
    fn set_open(&mut self, open: bool);

    /// Suppresses or restores scrolling of the page behind the lightbox.
    fn lock_scroll(&mut self, locked: bool);

    /// Swaps the displayed image source.
    fn show_image(&mut self, src: &str);

    /// Starts loading an image without displaying it.
    fn preload(&mut self, src: &str);

    /// Moves and fades the displayed image.
    fn place_image(&mut self, placement: ImagePlacement);

    /// Returns focus to the element that opened the lightbox.
    fn restore_focus(&mut self, trigger: &Self::Trigger);
}
