// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the ambient loop and the lightbox.
//!
//! This module provides a [`TraceSink`] trait with per-event methods. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::backend::DriftChannel;
use crate::lightbox::GesturePhase;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for every scheduled ambient frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbientFrameEvent {
    /// Host time of the callback.
    pub now: HostTime,
    /// `false` when the frame gate skipped the update.
    pub updated: bool,
    /// Which drift channels were committed, indexed like [`DriftChannel::ALL`].
    pub written: [bool; 3],
    /// Whether the turbulence step ran.
    pub turbulence: bool,
}

impl AmbientFrameEvent {
    /// Returns `true` if `channel` was committed this frame.
    #[must_use]
    pub fn wrote(&self, channel: DriftChannel) -> bool {
        self.written[channel_index(channel)]
    }

    /// Number of committed drift channels.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.written.iter().filter(|w| **w).count()
    }
}

/// Why the ambient loop started or stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopCause {
    /// Initial start at page load.
    Startup,
    /// `visibilitychange` to visible.
    Shown,
    /// `visibilitychange` to hidden.
    Hidden,
    /// `pageshow` (including back/forward cache restores).
    PageShow,
    /// `pagehide` teardown.
    PageHide,
}

/// Emitted when the ambient loop changes running state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// Running state after the change.
    pub running: bool,
    /// What triggered the change.
    pub cause: LoopCause,
}

/// Emitted when the lightbox gesture phase changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureEvent {
    /// Phase before the event was handled.
    pub from: GesturePhase,
    /// Phase after the event was handled.
    pub to: GesturePhase,
}

/// Emitted when the lightbox shows a different item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationEvent {
    /// New item index.
    pub index: usize,
    /// Number of items.
    pub len: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every scheduled ambient frame.
    fn on_ambient_frame(&mut self, e: &AmbientFrameEvent) {
        _ = e;
    }

    /// Called when the ambient loop starts or stops.
    fn on_loop(&mut self, e: &LoopEvent) {
        _ = e;
    }

    /// Called on a lightbox gesture phase change.
    fn on_gesture(&mut self, e: &GestureEvent) {
        _ = e;
    }

    /// Called when the lightbox shows a different item.
    fn on_navigation(&mut self, e: &NavigationEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AmbientFrameEvent`].
    #[inline]
    pub fn ambient_frame(&mut self, e: &AmbientFrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_ambient_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LoopEvent`].
    #[inline]
    pub fn loop_state(&mut self, e: &LoopEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_loop(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GestureEvent`] if `from` and `to` differ.
    #[inline]
    pub fn gesture(&mut self, from: GesturePhase, to: GesturePhase) {
        #[cfg(feature = "trace")]
        if from != to
            && let Some(s) = &mut self.sink
        {
            s.on_gesture(&GestureEvent { from, to });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (from, to);
        }
    }

    /// Emits a [`NavigationEvent`].
    #[inline]
    pub fn navigation(&mut self, e: &NavigationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_navigation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

/// Maps a [`DriftChannel`] to an array index.
pub(crate) const fn channel_index(channel: DriftChannel) -> usize {
    match channel {
        DriftChannel::X => 0,
        DriftChannel::Y => 1,
        DriftChannel::Rotation => 2,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> AmbientFrameEvent {
        AmbientFrameEvent {
            now: HostTime(1_000_000),
            updated: true,
            written: [true, false, true],
            turbulence: false,
        }
    }

    #[test]
    fn frame_event_channel_lookup() {
        let e = sample_frame();
        assert!(e.wrote(DriftChannel::X));
        assert!(!e.wrote(DriftChannel::Y));
        assert!(e.wrote(DriftChannel::Rotation));
        assert_eq!(e.write_count(), 2);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_ambient_frame(&sample_frame());
        sink.on_loop(&LoopEvent {
            now: HostTime(0),
            running: true,
            cause: LoopCause::Startup,
        });
        sink.on_navigation(&NavigationEvent { index: 0, len: 1 });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.ambient_frame(&sample_frame());
        tracer.gesture(GesturePhase::Idle, GesturePhase::Dragging);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            gestures: Vec<GestureEvent>,
            frames: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_ambient_frame(&mut self, _e: &AmbientFrameEvent) {
                self.frames += 1;
            }
            fn on_gesture(&mut self, e: &GestureEvent) {
                self.gestures.push(*e);
            }
        }

        let mut sink = RecordingSink {
            gestures: Vec::new(),
            frames: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.ambient_frame(&sample_frame());
        tracer.gesture(GesturePhase::Idle, GesturePhase::Idle);
        tracer.gesture(GesturePhase::Dragging, GesturePhase::Cancelling);
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, 1);
        assert_eq!(
            sink.gestures,
            [GestureEvent {
                from: GesturePhase::Dragging,
                to: GesturePhase::Cancelling,
            }],
            "unchanged phases are not reported"
        );
    }
}
