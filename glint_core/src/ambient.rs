// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient light drift.
//!
//! [`AmbientDriver`] turns elapsed page time into a slow, layered sine drift
//! (offset plus a small rotation) and an optional turbulence frequency pair.
//! It is called once per display refresh and does real work only when its
//! [`FrameGate`] admits the frame.
//!
//! Output is change-gated per channel: a [`WriteGate`] forwards a value to the
//! [`AmbientSurface`] only when it moved by more than the channel epsilon
//! since the last *written* value. Sub-pixel drift therefore accumulates
//! silently until it becomes visible, and no style write is issued for it
//! before then.

use kurbo::Vec2;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::backend::{AmbientSurface, DriftChannel};
use crate::capability::{Capabilities, MotionClass};
use crate::pacing::FrameGate;
use crate::time::{Duration, HostTime};
use crate::trace::{AmbientFrameEvent, Tracer, channel_index};

/// Minimum spacing between executed drift updates (~30 Hz).
pub const FRAME_MIN_INTERVAL: Duration = Duration::from_millis(33);

/// Spacing between turbulence updates (~6 Hz).
pub const TURBULENCE_INTERVAL: Duration = Duration::from_millis(160);

/// Offset channels are rewritten only past this many pixels of change.
pub const POSITION_EPSILON: f64 = 0.06;

/// The rotation channel is rewritten only past this many degrees of change.
pub const ROTATION_EPSILON: f64 = 0.012;

/// Turbulence oscillation around fixed base frequencies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbulenceConfig {
    /// Center frequencies (x, y).
    pub base: Vec2,
    /// Peak deviation from `base` on each axis.
    pub variance: f64,
    /// Spacing between updates.
    pub interval: Duration,
}

impl TurbulenceConfig {
    /// Preset for the given capabilities.
    #[must_use]
    pub const fn for_capabilities(caps: &Capabilities) -> Self {
        Self {
            base: Vec2::new(0.008, 0.011),
            variance: if caps.reduced_motion { 0.0006 } else { 0.0018 },
            interval: TURBULENCE_INTERVAL,
        }
    }

    /// Frequency pair at `t` seconds.
    #[must_use]
    pub fn frequency_at(&self, t: f64) -> Vec2 {
        Vec2::new(
            self.base.x + (t * 0.21).sin() * self.variance,
            self.base.y + (t * 0.17).cos() * self.variance,
        )
    }
}

/// Tuning for an [`AmbientDriver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientConfig {
    /// Peak drift per axis, in pixels.
    pub amplitude: Vec2,
    /// Peak rotation, in degrees.
    pub rotation_scale: f64,
    /// Minimum spacing between executed updates.
    pub frame_interval: Duration,
    /// Write threshold for the offset channels.
    pub position_epsilon: f64,
    /// Write threshold for the rotation channel.
    pub rotation_epsilon: f64,
    /// Secondary turbulence parameter; `None` disables it.
    pub turbulence: Option<TurbulenceConfig>,
}

impl AmbientConfig {
    /// Preset for the given capabilities.
    ///
    /// Amplitudes are 8×6 px for reduced motion, 24×16 px on compact
    /// viewports, and 56×40 px otherwise. Turbulence is enabled only in
    /// high-fidelity mode.
    #[must_use]
    pub const fn for_capabilities(caps: &Capabilities) -> Self {
        let amplitude = match caps.motion_class() {
            MotionClass::Reduced => Vec2::new(8.0, 6.0),
            MotionClass::Compact => Vec2::new(24.0, 16.0),
            MotionClass::Full => Vec2::new(56.0, 40.0),
        };
        Self {
            amplitude,
            rotation_scale: if caps.reduced_motion { 0.2 } else { 1.0 },
            frame_interval: FRAME_MIN_INTERVAL,
            position_epsilon: POSITION_EPSILON,
            rotation_epsilon: ROTATION_EPSILON,
            turbulence: if caps.high_fidelity() {
                Some(TurbulenceConfig::for_capabilities(caps))
            } else {
                None
            },
        }
    }

    /// Disables turbulence, e.g. when the page has no filter element for it.
    #[must_use]
    pub const fn without_turbulence(mut self) -> Self {
        self.turbulence = None;
        self
    }
}

/// One evaluated drift sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    /// Offset in pixels.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Drift {
    /// Value of a single channel.
    #[must_use]
    pub const fn channel(&self, channel: DriftChannel) -> f64 {
        match channel {
            DriftChannel::X => self.offset.x,
            DriftChannel::Y => self.offset.y,
            DriftChannel::Rotation => self.rotation,
        }
    }
}

/// Evaluates the layered drift at `t` seconds.
#[must_use]
pub fn drift_at(t: f64, amplitude: Vec2, rotation_scale: f64) -> Drift {
    let Vec2 { x: ax, y: ay } = amplitude;
    let travel = Vec2::new((t * 0.10).sin() * ax * 0.55, (t * 0.09).cos() * ay * 0.55);
    let x = travel.x + (t * 0.35).sin() * ax + (t * 0.18).sin() * ax * 0.55;
    let y = travel.y + (t * 0.30).cos() * ay + (t * 0.22).sin() * ay * 0.65;
    Drift {
        offset: Vec2::new(x, y),
        rotation: (t * 0.12).sin() * rotation_scale,
    }
}

/// Suppresses writes that would not visibly change a channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WriteGate {
    epsilon: f64,
    last: Option<f64>,
}

impl WriteGate {
    /// Creates a gate whose first offer always passes.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            last: None,
        }
    }

    /// Last value that passed the gate.
    #[must_use]
    pub const fn last_written(&self) -> Option<f64> {
        self.last
    }

    /// Returns `Some(value)` and records it if it differs from the last
    /// written value by more than epsilon.
    pub fn offer(&mut self, value: f64) -> Option<f64> {
        match self.last {
            Some(last) if (value - last).abs() <= self.epsilon => None,
            _ => {
                self.last = Some(value);
                Some(value)
            }
        }
    }

    /// Forgets the last written value so the next offer passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Frame-throttled, change-gated ambient drift driver.
#[derive(Clone, Debug)]
pub struct AmbientDriver {
    config: AmbientConfig,
    origin: HostTime,
    frame_gate: FrameGate,
    turbulence_gate: Option<FrameGate>,
    channels: [WriteGate; 3],
}

impl AmbientDriver {
    /// Creates a driver whose session time starts at `origin`.
    #[must_use]
    pub fn new(config: AmbientConfig, origin: HostTime) -> Self {
        let position = WriteGate::new(config.position_epsilon);
        Self {
            frame_gate: FrameGate::new(config.frame_interval),
            turbulence_gate: config.turbulence.map(|t| FrameGate::new(t.interval)),
            channels: [position, position, WriteGate::new(config.rotation_epsilon)],
            config,
            origin,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AmbientConfig {
        &self.config
    }

    /// Whether the turbulence step is enabled.
    #[must_use]
    pub const fn has_turbulence(&self) -> bool {
        self.turbulence_gate.is_some()
    }

    /// Last committed value of `channel`.
    #[must_use]
    pub fn last_written(&self, channel: DriftChannel) -> Option<f64> {
        self.channels[channel_index(channel)].last_written()
    }

    /// Forgets every committed drift value so the next update writes all
    /// channels again.
    ///
    /// Used when the page is restored and the surface may no longer hold
    /// what was last written.
    pub fn invalidate_writes(&mut self) {
        for gate in &mut self.channels {
            gate.reset();
        }
    }

    /// Seconds of session time at `now`.
    #[must_use]
    pub fn session_time(&self, now: HostTime) -> f64 {
        now.saturating_duration_since(self.origin).as_secs_f64()
    }

    /// Handles one scheduled frame callback.
    ///
    /// The turbulence step has its own cadence and is checked on every
    /// callback, independently of the drift gate.
    pub fn frame(
        &mut self,
        now: HostTime,
        surface: &mut impl AmbientSurface,
        tracer: &mut Tracer<'_>,
    ) -> AmbientFrameEvent {
        let t = self.session_time(now);
        let mut event = AmbientFrameEvent {
            now,
            updated: false,
            written: [false; 3],
            turbulence: false,
        };

        if self.frame_gate.admit(now) {
            event.updated = true;
            let drift = drift_at(t, self.config.amplitude, self.config.rotation_scale);
            for channel in DriftChannel::ALL {
                let idx = channel_index(channel);
                if let Some(value) = self.channels[idx].offer(drift.channel(channel)) {
                    surface.write_drift(channel, value);
                    event.written[idx] = true;
                }
            }
        }

        if let (Some(gate), Some(turbulence)) = (&mut self.turbulence_gate, &self.config.turbulence)
            && gate.admit(now)
        {
            surface.write_turbulence(turbulence.frequency_at(t));
            event.turbulence = true;
        }

        tracer.ambient_frame(&event);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct RecordingSurface {
        drift: Vec<(DriftChannel, f64)>,
        turbulence: Vec<Vec2>,
    }

    impl AmbientSurface for RecordingSurface {
        fn write_drift(&mut self, channel: DriftChannel, value: f64) {
            self.drift.push((channel, value));
        }

        fn write_turbulence(&mut self, frequency: Vec2) {
            self.turbulence.push(frequency);
        }
    }

    fn full_caps() -> Capabilities {
        Capabilities::default()
    }

    #[test]
    fn amplitude_presets() {
        let reduced = Capabilities {
            reduced_motion: true,
            ..Capabilities::default()
        };
        let compact = Capabilities {
            compact_viewport: true,
            ..Capabilities::default()
        };
        assert_eq!(
            AmbientConfig::for_capabilities(&reduced).amplitude,
            Vec2::new(8.0, 6.0)
        );
        assert_eq!(
            AmbientConfig::for_capabilities(&compact).amplitude,
            Vec2::new(24.0, 16.0)
        );
        assert_eq!(
            AmbientConfig::for_capabilities(&full_caps()).amplitude,
            Vec2::new(56.0, 40.0)
        );
    }

    #[test]
    fn reduced_motion_disables_turbulence() {
        // Every other flag clear: reduced motion alone must still disable it.
        let caps = Capabilities {
            reduced_motion: true,
            ..Capabilities::default()
        };
        let config = AmbientConfig::for_capabilities(&caps);
        assert_eq!(config.amplitude, Vec2::new(8.0, 6.0));
        assert!((config.rotation_scale - 0.2).abs() < 1e-12, "scaled rotation");
        assert!(config.turbulence.is_none(), "turbulence must be off");
        assert!(!AmbientDriver::new(config, HostTime(0)).has_turbulence());
    }

    #[test]
    fn turbulence_needs_high_fidelity_and_target() {
        let config = AmbientConfig::for_capabilities(&full_caps());
        assert!(config.turbulence.is_some(), "high fidelity enables it");
        assert!(config.without_turbulence().turbulence.is_none(), "no target");

        let low = Capabilities {
            low_concurrency: true,
            ..Capabilities::default()
        };
        assert!(AmbientConfig::for_capabilities(&low).turbulence.is_none());
    }

    #[test]
    fn drift_formula_at_known_times() {
        let amp = Vec2::new(56.0, 40.0);
        let at_zero = drift_at(0.0, amp, 1.0);
        // sin terms vanish; cos terms contribute 0.55·AY + AY.
        assert!(at_zero.offset.x.abs() < 1e-12, "x(0) = 0");
        assert!((at_zero.offset.y - 40.0 * 1.55).abs() < 1e-9, "y(0)");
        assert!(at_zero.rotation.abs() < 1e-12, "rotation(0) = 0");

        let t = 10.0_f64;
        let expected_x =
            (t * 0.10).sin() * 56.0 * 0.55 + (t * 0.35).sin() * 56.0 + (t * 0.18).sin() * 56.0 * 0.55;
        let d = drift_at(t, amp, 1.0);
        assert!((d.offset.x - expected_x).abs() < 1e-9, "x(10)");
        assert!((d.rotation - (t * 0.12).sin()).abs() < 1e-12, "rotation(10)");
    }

    #[test]
    fn drift_stays_within_amplitude_envelope() {
        let amp = Vec2::new(24.0, 16.0);
        for i in 0..2_000 {
            let d = drift_at(f64::from(i) * 0.37, amp, 1.0);
            assert!(d.offset.x.abs() <= amp.x * 2.1 + 1e-9, "x bounded");
            assert!(d.offset.y.abs() <= amp.y * 2.2 + 1e-9, "y bounded");
            assert!(d.rotation.abs() <= 1.0, "rotation bounded");
        }
    }

    #[test]
    fn write_gate_suppresses_small_changes() {
        let mut gate = WriteGate::new(POSITION_EPSILON);
        assert_eq!(gate.offer(0.0), Some(0.0), "first value commits");
        assert_eq!(gate.offer(0.05), None, "0.05 ≤ 0.06");
        assert_eq!(gate.offer(0.06), None, "exactly epsilon is suppressed");
        assert_eq!(gate.offer(-0.06), None, "in either direction");
        assert_eq!(gate.last_written(), Some(0.0), "committed value unchanged");
        assert_eq!(gate.offer(0.07), Some(0.07), "0.07 > 0.06");
        assert_eq!(gate.offer(0.0), Some(0.0), "direction does not matter");
    }

    #[test]
    fn write_gate_measures_against_last_written() {
        let mut gate = WriteGate::new(POSITION_EPSILON);
        gate.offer(0.0);
        // Small steps never individually exceed epsilon but accumulate.
        assert_eq!(gate.offer(0.04), None);
        assert_eq!(gate.offer(0.08), Some(0.08), "0.08 from 0.0 commits");
        gate.reset();
        assert_eq!(gate.offer(0.08), Some(0.08), "reset forgets");
    }

    #[test]
    fn invalidated_driver_rewrites_every_channel() {
        let config = AmbientConfig::for_capabilities(&full_caps()).without_turbulence();
        let mut driver = AmbientDriver::new(config, HostTime(0));
        let mut surface = RecordingSurface::default();
        let mut tracer = Tracer::none();

        driver.frame(HostTime::from_millis(2_000), &mut surface, &mut tracer);
        driver.invalidate_writes();
        assert_eq!(driver.last_written(DriftChannel::X), None, "gates forgotten");

        // 1 ms of drift is well under epsilon, but nothing is committed.
        let e = driver.frame(HostTime::from_millis(2_034), &mut surface, &mut tracer);
        assert_eq!(e.write_count(), 3, "every channel written after invalidation");
        assert_eq!(surface.drift.len(), 6, "two full rounds of writes");
    }

    #[test]
    fn rotation_uses_its_own_epsilon() {
        let mut gate = WriteGate::new(ROTATION_EPSILON);
        gate.offer(0.5);
        assert_eq!(gate.offer(0.511), None);
        assert_eq!(gate.offer(0.513), Some(0.513));
    }

    #[test]
    fn frames_are_throttled() {
        let config = AmbientConfig::for_capabilities(&full_caps()).without_turbulence();
        let mut driver = AmbientDriver::new(config, HostTime(0));
        let mut surface = RecordingSurface::default();
        let mut tracer = Tracer::none();

        let first = driver.frame(HostTime::from_millis(1_000), &mut surface, &mut tracer);
        assert!(first.updated);
        assert_eq!(first.write_count(), 3, "first frame writes every channel");

        let skipped = driver.frame(HostTime::from_millis(1_016), &mut surface, &mut tracer);
        assert!(!skipped.updated, "16 ms after the last update");
        assert_eq!(surface.drift.len(), 3, "no writes while throttled");

        let next = driver.frame(HostTime::from_millis(1_040), &mut surface, &mut tracer);
        assert!(next.updated, "40 ms after the last update");
    }

    #[test]
    fn driver_suppresses_redundant_writes() {
        // Reduced motion: rotation scale 0.2 barely moves over one frame.
        let caps = Capabilities {
            reduced_motion: true,
            ..Capabilities::default()
        };
        let mut driver = AmbientDriver::new(AmbientConfig::for_capabilities(&caps), HostTime(0));
        let mut surface = RecordingSurface::default();
        let mut tracer = Tracer::none();

        driver.frame(HostTime::from_millis(5_000), &mut surface, &mut tracer);
        let e = driver.frame(HostTime::from_millis(5_034), &mut surface, &mut tracer);
        assert!(e.updated);
        // d(rotation)/dt ≤ 0.2·0.12 deg/s → 0.0008 deg per 34 ms.
        assert!(!e.wrote(DriftChannel::Rotation), "imperceptible rotation");
        let rotation_writes = surface
            .drift
            .iter()
            .filter(|(c, _)| *c == DriftChannel::Rotation)
            .count();
        assert_eq!(rotation_writes, 1, "only the initial rotation write");
    }

    #[test]
    fn turbulence_runs_on_its_own_cadence() {
        let mut driver =
            AmbientDriver::new(AmbientConfig::for_capabilities(&full_caps()), HostTime(0));
        let mut surface = RecordingSurface::default();
        let mut tracer = Tracer::none();

        // One second of 60 Hz callbacks.
        let mut turbulence_frames = 0;
        for i in 0..60_u64 {
            let e = driver.frame(HostTime(i * 16_667), &mut surface, &mut tracer);
            if e.turbulence {
                turbulence_frames += 1;
            }
        }
        // 160 ms cadence: admitted at 0, ~167, ~333, ... → 6 updates per second.
        assert_eq!(turbulence_frames, 6);
        assert_eq!(surface.turbulence.len(), 6);
        for f in &surface.turbulence {
            assert!((f.x - 0.008).abs() <= 0.0018 + 1e-12, "x near base");
            assert!((f.y - 0.011).abs() <= 0.0018 + 1e-12, "y near base");
        }
    }

    #[test]
    fn session_time_is_relative_to_origin() {
        let driver = AmbientDriver::new(
            AmbientConfig::for_capabilities(&full_caps()),
            HostTime::from_millis(2_000),
        );
        assert!((driver.session_time(HostTime::from_millis(3_500)) - 1.5).abs() < 1e-9);
        assert_eq!(driver.session_time(HostTime::from_millis(1_000)), 0.0, "clamped");
    }
}
