// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device and preference capabilities, queried once per page load.
//!
//! A [`Capabilities`] value is produced by the backend at startup (see
//! `glint_backend_web::detect_capabilities`) and then handed by value to every
//! feature initializer. Nothing re-queries it afterwards, so the motion policy
//! for the session is decided in one place.

/// Immutable capability flags for the current session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// The user asked the platform for reduced motion.
    pub reduced_motion: bool,
    /// The viewport is at or below the compact breakpoint.
    pub compact_viewport: bool,
    /// Touch-primary or otherwise constrained environment (e.g. iOS Safari).
    pub constrained_environment: bool,
    /// The device reports few logical cores.
    pub low_concurrency: bool,
}

impl Capabilities {
    /// Whether the expensive visual extras may run.
    ///
    /// True only when none of the limiting flags are set.
    #[inline]
    #[must_use]
    pub const fn high_fidelity(self) -> bool {
        !(self.reduced_motion
            || self.compact_viewport
            || self.constrained_environment
            || self.low_concurrency)
    }

    /// Coarse motion class used to pick amplitude presets.
    #[inline]
    #[must_use]
    pub const fn motion_class(self) -> MotionClass {
        if self.reduced_motion {
            MotionClass::Reduced
        } else if self.compact_viewport {
            MotionClass::Compact
        } else {
            MotionClass::Full
        }
    }
}

/// Motion class derived from [`Capabilities`].
///
/// Reduced motion wins over the compact viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionClass {
    /// Reduced-motion preference is set.
    Reduced,
    /// Small viewport, no reduced-motion preference.
    Compact,
    /// Everything else.
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_fidelity_requires_all_flags_clear() {
        assert!(Capabilities::default().high_fidelity(), "no limits");

        let limited = [
            Capabilities {
                reduced_motion: true,
                ..Capabilities::default()
            },
            Capabilities {
                compact_viewport: true,
                ..Capabilities::default()
            },
            Capabilities {
                constrained_environment: true,
                ..Capabilities::default()
            },
            Capabilities {
                low_concurrency: true,
                ..Capabilities::default()
            },
        ];
        for caps in limited {
            assert!(!caps.high_fidelity(), "{caps:?} must disable high fidelity");
        }
    }

    #[test]
    fn reduced_motion_wins_over_compact() {
        let caps = Capabilities {
            reduced_motion: true,
            compact_viewport: true,
            ..Capabilities::default()
        };
        assert_eq!(caps.motion_class(), MotionClass::Reduced);

        let caps = Capabilities {
            compact_viewport: true,
            low_concurrency: true,
            ..Capabilities::default()
        };
        assert_eq!(caps.motion_class(), MotionClass::Compact);
        assert_eq!(Capabilities::default().motion_class(), MotionClass::Full);
    }
}
